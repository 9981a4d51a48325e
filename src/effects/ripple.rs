use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::dom::{self, anchors, Bindings};

#[cfg(test)]
#[path = "ripple_test.rs"]
mod ripple_test;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// A circle covering the control, centred on the click, in coordinates
/// relative to the control's top-left corner.
pub fn ripple_geometry(
    rect_left: f64,
    rect_top: f64,
    width: f64,
    height: f64,
    client_x: f64,
    client_y: f64,
) -> RippleGeometry {
    let size = width.max(height);
    RippleGeometry {
        size,
        left: client_x - rect_left - size / 2.0,
        top: client_y - rect_top - size / 2.0,
    }
}

fn spawn(button: &HtmlElement, event: &MouseEvent) -> Option<()> {
    let document = button.owner_document()?;
    let ripple = document
        .create_element("span")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    dom::add_class(&ripple, "ripple");

    let rect = button.get_bounding_client_rect();
    let geometry = ripple_geometry(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );
    let size = format!("{}px", geometry.size);
    dom::set_style(&ripple, "width", &size);
    dom::set_style(&ripple, "height", &size);
    dom::set_style(&ripple, "left", &format!("{}px", geometry.left));
    dom::set_style(&ripple, "top", &format!("{}px", geometry.top));

    button.append_child(&ripple).ok()?;
    let node = ripple.clone();
    EventListener::once(&ripple, "animationend", move |_| node.remove()).forget();
    Some(())
}

pub fn attach(document: &Document) -> Bindings {
    let mut bindings = Bindings::default();
    for button in dom::query_all_in(document, anchors::RIPPLE_BUTTON) {
        let target = button.clone();
        bindings.listen(EventListener::new(&button, "click", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                spawn(&target, event);
            }
        }));
    }
    bindings
}
