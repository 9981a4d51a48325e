//! Hash routing between the page sections of the site.
//!
//! [`Router`] is the transition state machine and knows nothing about the
//! DOM. [`PageSwitcher`] applies its decisions to the `.page` sections.

use log::warn;
use web_sys::{Document, HtmlElement};

use crate::dom::{self, anchors};

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "router_dom_test.rs"]
mod router_dom_test;

/// Route named by a location fragment such as `#about`. An empty fragment
/// names no route.
pub fn route_from_hash(hash: &str) -> Option<&str> {
    let route = hash.strip_prefix('#').unwrap_or(hash);
    if route.is_empty() {
        None
    } else {
        Some(route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A swap to `to` is scheduled; `from` (if any) is fading out meanwhile.
    Pending {
        from: Option<String>,
        to: String,
        ticket: u64,
    },
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Already showing (or already heading to) the requested section.
    Unchanged,
    /// Fade `fade` out, then call [`Router::finish`] with `ticket` after
    /// `delay_ms`.
    Schedule {
        fade: Option<String>,
        to: String,
        delay_ms: u32,
        ticket: u64,
    },
    /// A pending swap was replaced by one to a different section.
    Retargeted {
        fade: Option<String>,
        to: String,
        delay_ms: u32,
        ticket: u64,
    },
    /// The pending swap was dropped because the request named the section
    /// that is still showing; `restore` needs its fade styles cleared.
    Cancelled { restore: String },
}

/// What the page has to do once a swap lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    pub to: String,
    /// Set only when arriving on the home section.
    pub rearm_counters: bool,
}

#[derive(Debug, Clone)]
pub struct Router {
    pages: Vec<String>,
    default_route: String,
    home_route: String,
    fade_ms: u32,
    active: Option<String>,
    phase: Phase,
    next_ticket: u64,
}

impl Router {
    /// `default_route` must name one of `pages`; otherwise the first page
    /// takes its place so unknown routes still land on a real section.
    pub fn new(pages: Vec<String>, default_route: &str, fade_ms: u32) -> Self {
        let default_route = match pages.first() {
            Some(first) if !pages.iter().any(|p| p == default_route) => {
                warn!(
                    "Default route {:?} has no page, falling back to {:?}",
                    default_route, first
                );
                first.clone()
            }
            _ => default_route.to_string(),
        };
        if pages.is_empty() {
            warn!("No page sections found");
        }
        Self {
            home_route: default_route.clone(),
            pages,
            default_route,
            fade_ms,
            active: None,
            phase: Phase::Idle,
            next_ticket: 0,
        }
    }

    /// The section whose arrival re-arms the counters.
    pub fn with_home_route(mut self, home_route: &str) -> Self {
        self.home_route = home_route.to_string();
        self
    }

    pub fn default_route(&self) -> &str {
        &self.default_route
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn knows(&self, route: &str) -> bool {
        self.pages.iter().any(|p| p == route)
    }

    /// The section a request for `route` ends up on.
    pub fn resolve<'a>(&'a self, route: &'a str) -> &'a str {
        if self.knows(route) {
            route
        } else {
            &self.default_route
        }
    }

    pub fn navigate(&mut self, route: &str) -> Step {
        let target = self.resolve(route).to_string();

        match self.phase.clone() {
            Phase::Idle => {
                if self.active.as_deref() == Some(target.as_str()) {
                    return Step::Unchanged;
                }
                let (fade, delay_ms, ticket) = self.begin(target.clone());
                Step::Schedule {
                    fade,
                    to: target,
                    delay_ms,
                    ticket,
                }
            }
            Phase::Pending { to, .. } if to == target => Step::Unchanged,
            Phase::Pending {
                from: Some(restore),
                ..
            } if restore == target => {
                self.phase = Phase::Idle;
                Step::Cancelled { restore }
            }
            Phase::Pending { .. } => {
                let (fade, delay_ms, ticket) = self.begin(target.clone());
                Step::Retargeted {
                    fade,
                    to: target,
                    delay_ms,
                    ticket,
                }
            }
        }
    }

    fn begin(&mut self, to: String) -> (Option<String>, u32, u64) {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let from = self.active.clone();
        let delay_ms = if from.is_some() { self.fade_ms } else { 0 };
        self.phase = Phase::Pending {
            from: from.clone(),
            to,
            ticket,
        };
        (from, delay_ms, ticket)
    }

    /// Completes the swap scheduled under `ticket`. Returns `None` when the
    /// ticket was superseded or cancelled.
    pub fn finish(&mut self, ticket: u64) -> Option<Swap> {
        match &self.phase {
            Phase::Pending { to, ticket: t, .. } if *t == ticket => {
                let to = to.clone();
                self.active = Some(to.clone());
                self.phase = Phase::Idle;
                Some(Swap {
                    rearm_counters: to == self.home_route,
                    to,
                })
            }
            _ => None,
        }
    }
}

/// The `.page` sections, keyed by their `data-page` attribute.
pub struct PageSwitcher {
    pages: Vec<(String, HtmlElement)>,
}

impl PageSwitcher {
    pub fn discover(document: &Document) -> Self {
        let pages = dom::query_all_in(document, anchors::PAGE)
            .into_iter()
            .filter_map(|el| el.get_attribute(anchors::PAGE_KEY).map(|key| (key, el)))
            .collect();
        Self { pages }
    }

    pub fn keys(&self) -> Vec<String> {
        self.pages.iter().map(|(key, _)| key.clone()).collect()
    }

    fn get(&self, key: &str) -> Option<&HtmlElement> {
        self.pages.iter().find(|(k, _)| k == key).map(|(_, el)| el)
    }

    pub fn fade_out(&self, key: &str, fade_ms: u32) {
        let Some(page) = self.get(key) else { return };
        let secs = f64::from(fade_ms) / 1000.0;
        dom::set_style(page, "opacity", "0");
        dom::set_style(page, "transform", "translateY(-8px)");
        dom::set_style(
            page,
            "transition",
            &format!("opacity {secs}s ease, transform {secs}s ease"),
        );
    }

    pub fn clear_fade(&self, key: &str) {
        if let Some(page) = self.get(key) {
            Self::reset(page);
        }
    }

    /// Resets every section, then activates `key`.
    pub fn activate(&self, key: &str) {
        for (_, page) in &self.pages {
            dom::remove_class(page, "is-active");
            Self::reset(page);
        }
        if let Some(page) = self.get(key) {
            dom::add_class(page, "is-active");
        }
    }

    fn reset(page: &HtmlElement) {
        dom::set_style(page, "opacity", "");
        dom::set_style(page, "transform", "");
        dom::set_style(page, "transition", "");
    }
}
