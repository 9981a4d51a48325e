//! Scroll-triggered entrance animations for `[data-reveal]` elements.
//!
//! Each element is revealed at most once. [`RevealRegistry`] records which
//! elements have been seen and how far along they are; [`RevealSystem`]
//! watches the page and moves elements through the registry.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::config::SiteConfig;
use crate::dom::{self, anchors};
use crate::error::SiteResult;
use crate::observer::{ViewportWatcher, Watch, WatchOptions};

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

const VISIBLE: &str = "is-visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Waiting to scroll into view.
    Watching,
    /// Seen; `is-visible` goes on once its delay has passed.
    Scheduled,
    Visible,
}

/// Every reveal element discovered so far.
#[derive(Debug, Clone)]
pub struct RevealRegistry<K> {
    entries: Vec<(K, RevealState)>,
}

impl<K> Default for RevealRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone> RevealRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn state(&self, key: &K) -> Option<RevealState> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, state)| *state)
    }

    /// Registers candidates not seen before. Candidates that already carry
    /// the visible flag are recorded as visible. Returns the keys that need
    /// watching.
    pub fn discover<I>(&mut self, candidates: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut fresh = Vec::new();
        for (key, already_visible) in candidates {
            if self.state(&key).is_some() {
                continue;
            }
            if already_visible {
                self.entries.push((key, RevealState::Visible));
            } else {
                self.entries.push((key.clone(), RevealState::Watching));
                fresh.push(key);
            }
        }
        fresh
    }

    /// Watching → Scheduled. Returns false for anything not being watched.
    pub fn trigger(&mut self, key: &K) -> bool {
        self.transition(key, RevealState::Watching, RevealState::Scheduled)
    }

    /// Moves a watched or scheduled element to Visible. Returns false when
    /// it was already visible or is unknown.
    pub fn mark_visible(&mut self, key: &K) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, state)) if *state != RevealState::Visible => {
                *state = RevealState::Visible;
                true
            }
            _ => false,
        }
    }

    fn transition(&mut self, key: &K, from: RevealState, to: RevealState) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, state)) if *state == from => {
                *state = to;
                true
            }
            _ => false,
        }
    }
}

struct RevealInner {
    registry: RefCell<RevealRegistry<Element>>,
    watcher: RefCell<Option<ViewportWatcher>>,
    options: WatchOptions,
    will_change_reset_ms: u32,
}

#[derive(Clone)]
pub struct RevealSystem {
    inner: Rc<RevealInner>,
}

impl RevealSystem {
    pub fn new(config: &SiteConfig) -> Self {
        let options = WatchOptions::threshold(config.reveal_threshold)
            .with_root_margin(&config.reveal_root_margin);
        Self {
            inner: Rc::new(RevealInner {
                registry: RefCell::new(RevealRegistry::new()),
                watcher: RefCell::new(None),
                options,
                will_change_reset_ms: config.reveal_will_change_reset_ms,
            }),
        }
    }

    /// Picks up reveal elements that appeared since the last pass. Safe to
    /// call after every navigation.
    pub fn discover(&self) -> SiteResult<usize> {
        let document = dom::document()?;
        let candidates = dom::query_all_in(&document, anchors::REVEAL)
            .into_iter()
            .map(|el| {
                let visible = el.class_list().contains(VISIBLE);
                (Element::from(el), visible)
            });
        let fresh = self.inner.registry.borrow_mut().discover(candidates);
        if fresh.is_empty() {
            return Ok(0);
        }

        if dom::prefers_reduced_motion() {
            let mut registry = self.inner.registry.borrow_mut();
            for el in &fresh {
                registry.mark_visible(el);
                dom::add_class(el, VISIBLE);
            }
            return Ok(fresh.len());
        }

        self.ensure_watcher()?;
        if let Some(watcher) = self.inner.watcher.borrow().as_ref() {
            for el in &fresh {
                watcher.observe(el);
            }
        }
        log::debug!(
            "Watching {} new reveal elements ({} known)",
            fresh.len(),
            self.inner.registry.borrow().len()
        );
        Ok(fresh.len())
    }

    fn ensure_watcher(&self) -> SiteResult<()> {
        if self.inner.watcher.borrow().is_some() {
            return Ok(());
        }
        let system = self.clone();
        let watcher = ViewportWatcher::new(&self.inner.options, move |sighting| {
            if !sighting.visible {
                return Watch::Continue;
            }
            system.on_enter(sighting.target);
            Watch::Stop
        })?;
        *self.inner.watcher.borrow_mut() = Some(watcher);
        Ok(())
    }

    fn on_enter(&self, el: Element) {
        if !self.inner.registry.borrow_mut().trigger(&el) {
            return;
        }
        let delay = dom::int_attr(&el, anchors::REVEAL_DELAY).clamp(0, i64::from(u32::MAX)) as u32;
        let system = self.clone();
        Timeout::new(delay, move || system.show(el)).forget();
    }

    fn show(&self, el: Element) {
        if !self.inner.registry.borrow_mut().mark_visible(&el) {
            return;
        }
        dom::add_class(&el, VISIBLE);
        if let Ok(html) = el.dyn_into::<HtmlElement>() {
            Timeout::new(self.inner.will_change_reset_ms, move || {
                dom::set_style(&html, "will-change", "auto");
            })
            .forget();
        }
    }
}
