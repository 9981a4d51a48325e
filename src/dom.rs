use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{SiteError, SiteResult};
use crate::observer::ViewportWatcher;

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// Ids, selectors and attributes the page markup provides.
pub mod anchors {
    pub const PAGE: &str = ".page";
    pub const PAGE_KEY: &str = "data-page";
    pub const ROUTE_LINK: &str = "[data-route]";
    pub const ROUTE_KEY: &str = "data-route";
    pub const REVEAL: &str = "[data-reveal]";
    pub const REVEAL_DELAY: &str = "data-reveal-delay";
    pub const COUNTER: &str = ".counter";
    pub const COUNTER_TARGET: &str = "data-target";

    pub const BURGER: &str = "burger";
    pub const DRAWER: &str = "drawer";
    pub const DROPDOWN: &str = "programmesDropdown";
    pub const DROPDOWN_BUTTON: &str = "programmesBtn";
    pub const YEAR: &str = "year";
    pub const HERO: &str = ".hero";
    pub const HERO_VIDEO: &str = ".hero-video";
    pub const HERO_TITLE: &str = "heroTitle";
    pub const HERO_PARTICLES: &str = "heroParticles";
    pub const TOP_BAR: &str = "top";
    pub const SITE_LOADER: &str = "siteLoader";
    pub const IMPACT_SECTION: &str = "impactSection";
    pub const TILT_CARD: &str = ".prog-card";
    pub const RIPPLE_BUTTON: &str = ".btn, .donate-btn";
    pub const CONFIG: &str = "siteConfig";
}

pub fn window() -> SiteResult<Window> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document() -> SiteResult<Document> {
    window()?.document().ok_or(SiteError::NoDocument)
}

pub fn by_id(document: &Document, id: &'static str) -> SiteResult<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(SiteError::MissingAnchor(id))
}

pub fn query(document: &Document, selector: &'static str) -> SiteResult<HtmlElement> {
    document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(SiteError::MissingAnchor(selector))
}

/// All elements under `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query_all_in(document: &Document, selector: &str) -> Vec<HtmlElement> {
    match document.document_element() {
        Some(root) => query_all(&root, selector),
        None => Vec::new(),
    }
}

/// Leading integer of an attribute value, read the way `parseInt(v, 10)`
/// reads it: surrounding whitespace and trailing junk are ignored.
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if run.is_empty() {
        return None;
    }
    // An all-digit run only fails to parse on overflow.
    Some(match run.parse::<i64>() {
        Ok(n) => sign * n,
        Err(_) if sign < 0 => i64::MIN,
        Err(_) => i64::MAX,
    })
}

pub fn int_attr(element: &Element, name: &str) -> i64 {
    element
        .get_attribute(name)
        .and_then(|raw| parse_int(&raw))
        .unwrap_or(0)
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map_or(false, |mq| mq.matches())
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Sets (or with an empty value, clears) an inline style property.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let style = element.style();
    let _ = if value.is_empty() {
        style.remove_property(property).map(|_| ())
    } else {
        style.set_property(property, value)
    };
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

/// Listener whose callback may call `prevent_default`.
pub fn listen_active<F>(target: &EventTarget, event: &'static str, callback: F) -> EventListener
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event,
        EventListenerOptions::enable_prevent_default(),
        callback,
    )
}

/// Handles that must stay alive for a behavior to keep working.
#[derive(Default)]
pub struct Bindings {
    listeners: Vec<EventListener>,
    watchers: Vec<ViewportWatcher>,
}

impl Bindings {
    pub fn listen(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn watch(&mut self, watcher: ViewportWatcher) {
        self.watchers.push(watcher);
    }

    pub fn extend(&mut self, other: Bindings) {
        self.listeners.extend(other.listeners);
        self.watchers.extend(other.watchers);
    }

    pub fn len(&self) -> usize {
        self.listeners.len() + self.watchers.len()
    }
}
