use chrono::Datelike;
use gloo_timers::callback::Timeout;
use web_sys::Document;

use crate::config::SiteConfig;
use crate::dom::{self, anchors};
use crate::error::SiteResult;

/// Fades the splash overlay out shortly after load, then removes it from
/// the layout.
pub fn run(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let loader = dom::by_id(document, anchors::SITE_LOADER)?;
    let fade_ms = config.loader_fade_ms;

    Timeout::new(config.loader_delay_ms, move || {
        dom::add_class(&loader, "fade-out");
        Timeout::new(fade_ms, move || {
            dom::set_style(&loader, "display", "none");
        })
        .forget();
    })
    .forget();
    Ok(())
}

pub fn show_year(document: &Document) -> SiteResult<i32> {
    let year_el = dom::by_id(document, anchors::YEAR)?;
    let year = chrono::Local::now().year();
    year_el.set_text_content(Some(&year.to_string()));
    Ok(year)
}
