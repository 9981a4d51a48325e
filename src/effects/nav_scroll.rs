use gloo_events::EventListener;
use web_sys::Document;

use crate::config::SiteConfig;
use crate::dom::{self, anchors, Bindings};
use crate::error::SiteResult;
use crate::frame::FrameThrottle;

/// Adds `scrolled` to the top bar once the page has moved past `offset`.
pub fn attach(document: &Document, config: &SiteConfig) -> SiteResult<Bindings> {
    let topbar = dom::by_id(document, anchors::TOP_BAR)?;
    let window = dom::window()?;
    let offset = config.nav_scrolled_offset;
    let throttle = FrameThrottle::new();

    let mut bindings = Bindings::default();
    bindings.listen(EventListener::new(&window, "scroll", move |_| {
        let topbar = topbar.clone();
        throttle.run(move || {
            let _ = topbar
                .class_list()
                .toggle_with_force("scrolled", dom::scroll_y() > offset);
        });
    }));
    Ok(bindings)
}
