//! Viewport-intersection watching.
//!
//! [`ViewportWatcher`] owns an `IntersectionObserver` together with the
//! closure it calls back into, so dropping the watcher disconnects the
//! observer and frees the closure.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::SiteResult;

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub threshold: f64,
    pub root_margin: Option<String>,
}

impl WatchOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: None,
        }
    }

    pub fn with_root_margin(mut self, margin: &str) -> Self {
        self.root_margin = Some(margin.to_string());
        self
    }
}

/// What to do with an element after its callback ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Continue,
    Stop,
}

pub struct Sighting {
    pub target: Element,
    pub visible: bool,
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct ViewportWatcher {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl ViewportWatcher {
    pub fn new<F>(options: &WatchOptions, mut on_change: F) -> SiteResult<Self>
    where
        F: FnMut(Sighting) -> Watch + 'static,
    {
        let callback: ObserverCallback = Closure::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let sighting = Sighting {
                        target: target.clone(),
                        visible: entry.is_intersecting(),
                    };
                    if on_change(sighting) == Watch::Stop {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        if let Some(margin) = &options.root_margin {
            init.set_root_margin(margin);
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for ViewportWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
