//! The site as a whole: owns every controller and wires them to the page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::{Document, ScrollBehavior, ScrollToOptions};

use crate::config::SiteConfig;
use crate::counter::CounterAnimator;
use crate::dom::{self, anchors, Bindings};
use crate::effects::{nav_scroll, parallax, particles, ripple, text_reveal, tilt};
use crate::error::SiteResult;
use crate::loader;
use crate::menu::Menus;
use crate::reveal::RevealSystem;
use crate::router::{route_from_hash, PageSwitcher, Router, Step};

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "app_test.rs"]
mod app_test;

thread_local! {
    static SITE: RefCell<Option<Rc<Site>>> = RefCell::new(None);
}

pub struct Site {
    config: SiteConfig,
    document: Document,
    pages: PageSwitcher,
    router: RefCell<Router>,
    pending_swap: RefCell<Option<Timeout>>,
    menus: Menus,
    reveal: RevealSystem,
    counters: CounterAnimator,
    bindings: RefCell<Bindings>,
}

/// Attaches the site behaviors and keeps them alive for the page lifetime.
pub fn start() {
    let site = match Site::new() {
        Ok(site) => Rc::new(site),
        Err(err) => {
            err.log("site");
            return;
        }
    };
    site.wire();

    if site.document.ready_state() == "complete" {
        site.boot();
    } else if let Ok(window) = dom::window() {
        let booting = Rc::clone(&site);
        let on_load = EventListener::once(&window, "load", move |_| booting.boot());
        site.bindings.borrow_mut().listen(on_load);
    }

    SITE.with(|slot| *slot.borrow_mut() = Some(site));
}

impl Site {
    fn new() -> SiteResult<Self> {
        let document = dom::document()?;
        let config = SiteConfig::load();
        let pages = PageSwitcher::discover(&document);
        let router = Router::new(pages.keys(), &config.default_route, config.fade_ms)
            .with_home_route(&config.home_route);
        debug!("Found pages: {:?}", pages.keys());

        Ok(Self {
            menus: Menus::find(&document),
            reveal: RevealSystem::new(&config),
            counters: CounterAnimator::new(&config),
            router: RefCell::new(router),
            pending_swap: RefCell::new(None),
            bindings: RefCell::new(Bindings::default()),
            pages,
            document,
            config,
        })
    }

    /// Listeners that must be live before the first paint: routing and the
    /// navigation menus.
    fn wire(self: &Rc<Self>) {
        let mut bindings = Bindings::default();

        if let Ok(window) = dom::window() {
            let site = Rc::clone(self);
            bindings.listen(EventListener::new(&window, "hashchange", move |_| {
                site.handle_route();
            }));
        }

        for link in dom::query_all_in(&self.document, anchors::ROUTE_LINK) {
            let site = Rc::clone(self);
            let target = link.clone();
            bindings.listen(dom::listen_active(&link, "click", move |event| {
                event.prevent_default();
                match target.get_attribute(anchors::ROUTE_KEY) {
                    Some(route) if !route.is_empty() => site.follow_link(&route),
                    _ => {}
                }
            }));
        }

        if let Some(drawer) = &self.menus.drawer {
            let menus = self.menus.clone();
            bindings.listen(EventListener::new(drawer.burger(), "click", move |_| {
                menus.toggle_drawer();
            }));
        }

        if let Some(dropdown) = &self.menus.dropdown {
            let menus = self.menus.clone();
            bindings.listen(dom::listen_active(dropdown.button(), "click", move |event| {
                event.prevent_default();
                event.stop_propagation();
                menus.toggle_dropdown();
            }));

            let menus = self.menus.clone();
            bindings.listen(EventListener::new(&self.document, "click", move |_| {
                menus.close_dropdown();
            }));
        }

        self.bindings.borrow_mut().extend(bindings);
    }

    /// One-time setup once the page has loaded.
    fn boot(self: &Rc<Self>) {
        let document = &self.document;
        let config = &self.config;

        if let Err(err) = loader::run(document, config) {
            err.log("site loader");
        }
        if let Err(err) = loader::show_year(document) {
            err.log("year");
        }
        self.keep("nav scroll state", nav_scroll::attach(document, config));
        self.keep("hero parallax", parallax::attach(document, config));
        if let Err(err) = text_reveal::attach(document, config) {
            err.log("hero text reveal");
        }
        self.keep("hero particles", particles::attach(document, config));
        self.keep("card tilt", Ok(tilt::attach(document, config)));
        self.keep("ripple", Ok(ripple::attach(document)));

        if let Err(err) = self.reveal.discover() {
            err.log("reveal");
        }
        if let Err(err) = self.counters.arm(document) {
            err.log("counters");
        }

        info!(
            "Site ready with {} live bindings",
            self.bindings.borrow().len()
        );
        self.handle_route();
    }

    fn keep(&self, component: &str, attached: SiteResult<Bindings>) {
        match attached {
            Ok(bindings) => self.bindings.borrow_mut().extend(bindings),
            Err(err) => err.log(component),
        }
    }

    fn handle_route(self: &Rc<Self>) {
        let hash = dom::window()
            .and_then(|w| Ok(w.location().hash()?))
            .unwrap_or_default();
        let route = match route_from_hash(&hash) {
            Some(route) => route.to_string(),
            None => self.router.borrow().default_route().to_string(),
        };
        self.navigate(&route);
    }

    /// A route control was activated. Writing the fragment triggers
    /// `hashchange`, unless the fragment already names the route.
    fn follow_link(self: &Rc<Self>, route: &str) {
        let Ok(window) = dom::window() else { return };
        let location = window.location();
        let current = location.hash().unwrap_or_default();
        if route_from_hash(&current) == Some(route) {
            self.navigate(route);
        } else {
            let _ = location.set_hash(route);
        }
    }

    pub fn navigate(self: &Rc<Self>, route: &str) {
        let step = self.router.borrow_mut().navigate(route);
        match step {
            Step::Unchanged => {
                let router = self.router.borrow();
                debug!("Already on {:?} ({:?})", router.active(), router.phase());
            }
            Step::Cancelled { restore } => {
                debug!("Navigation back to {} cancelled pending swap", restore);
                self.pending_swap.borrow_mut().take();
                self.pages.clear_fade(&restore);
            }
            Step::Schedule {
                fade,
                to,
                delay_ms,
                ticket,
            }
            | Step::Retargeted {
                fade,
                to,
                delay_ms,
                ticket,
            } => {
                debug!("Navigating to {} in {}ms", to, delay_ms);
                if let Some(from) = &fade {
                    self.pages.fade_out(from, self.config.fade_ms);
                }
                let site = Rc::clone(self);
                let swap = Timeout::new(delay_ms, move || site.swap(ticket));
                // Replacing the handle cancels any swap still pending.
                *self.pending_swap.borrow_mut() = Some(swap);
            }
        }
    }

    fn swap(self: &Rc<Self>, ticket: u64) {
        let Some(swap) = self.router.borrow_mut().finish(ticket) else {
            return;
        };
        self.pending_swap.borrow_mut().take();

        self.pages.activate(&swap.to);
        self.menus.close_all();
        scroll_to_top();

        if let Err(err) = self.reveal.discover() {
            err.log("reveal");
        }
        if swap.rearm_counters {
            if self.counters.has_run() {
                debug!("Re-arming counters");
            }
            self.counters.reset();
            if let Err(err) = self.counters.arm(&self.document) {
                err.log("counters");
            }
        }
        info!("Showing page {}", swap.to);
    }
}

fn scroll_to_top() {
    if let Ok(window) = dom::window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
