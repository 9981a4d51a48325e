use gloo_events::EventListener;
use web_sys::Document;

use crate::config::SiteConfig;
use crate::dom::{self, anchors, Bindings};
use crate::error::SiteResult;
use crate::frame::FrameThrottle;

#[cfg(test)]
#[path = "parallax_test.rs"]
mod parallax_test;

/// Transform for the hero video at `scroll_y`. `None` once the hero has
/// scrolled out, which leaves the last transform in place.
pub fn parallax_transform(scroll_y: f64, hero_height: f64, factor: f64) -> Option<String> {
    if scroll_y < hero_height {
        Some(format!("translateY({}px) scale(1.1)", scroll_y * factor))
    } else {
        None
    }
}

pub fn attach(document: &Document, config: &SiteConfig) -> SiteResult<Bindings> {
    let video = dom::query(document, anchors::HERO_VIDEO)?;
    let hero = dom::query(document, anchors::HERO)?;
    let window = dom::window()?;
    let factor = config.parallax_factor;
    let throttle = FrameThrottle::new();

    let mut bindings = Bindings::default();
    bindings.listen(EventListener::new(&window, "scroll", move |_| {
        let video = video.clone();
        let hero = hero.clone();
        throttle.run(move || {
            let height = f64::from(hero.offset_height());
            if let Some(transform) = parallax_transform(dom::scroll_y(), height, factor) {
                dom::set_style(&video, "transform", &transform);
            }
        });
    }));
    Ok(bindings)
}
