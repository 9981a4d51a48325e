use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent};

use crate::config::SiteConfig;
use crate::dom::{self, anchors, Bindings};

#[cfg(test)]
#[path = "tilt_test.rs"]
mod tilt_test;

pub const FLAT: &str = "perspective(800px) rotateY(0deg) rotateX(0deg) scale(1)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position relative to the card centre, each axis in [-0.5, 0.5].
pub fn pointer_offset(rect: CardRect, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = (client_x - rect.left) / rect.width - 0.5;
    let y = (client_y - rect.top) / rect.height - 0.5;
    Some((x, y))
}

/// Card transform for a pointer offset, each axis scaled by `factor_deg`.
pub fn tilt_transform(x: f64, y: f64, factor_deg: f64) -> String {
    format!(
        "perspective(800px) rotateY({}deg) rotateX({}deg) scale(1.02)",
        x * factor_deg,
        -y * factor_deg
    )
}

pub fn attach(document: &Document, config: &SiteConfig) -> Bindings {
    let mut bindings = Bindings::default();
    let factor_deg = config.tilt_factor_deg;

    for card in dom::query_all_in(document, anchors::TILT_CARD) {
        let target = card.clone();
        bindings.listen(EventListener::new(&card, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let bounds = target.get_bounding_client_rect();
            let rect = CardRect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            };
            let offset = pointer_offset(
                rect,
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            );
            if let Some((x, y)) = offset {
                dom::set_style(&target, "transform", &tilt_transform(x, y, factor_deg));
            }
        }));

        let target = card.clone();
        bindings.listen(EventListener::new(&card, "mouseleave", move |_| {
            dom::set_style(&target, "transform", FLAT);
        }));
    }
    bindings
}
