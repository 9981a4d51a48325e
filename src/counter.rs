//! Count-up animation for the impact numbers on the home page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use web_sys::{Document, Element};

use crate::config::SiteConfig;
use crate::dom::{self, anchors};
use crate::error::SiteResult;
use crate::observer::{ViewportWatcher, Watch, WatchOptions};

#[cfg(test)]
#[path = "counter_test.rs"]
mod counter_test;

/// Exponential ease-out, pinned to exactly 1 at the end.
pub fn ease_out_expo(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

/// Groups digits in threes with commas: `12345` becomes `12,345`.
pub fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(target_arch = "wasm32")]
pub fn format_count(value: i64) -> String {
    let language = web_sys::window()
        .and_then(|w| w.navigator().language())
        .unwrap_or_else(|| "en-US".to_string());
    web_sys::js_sys::Number::from(value as f64)
        .to_locale_string(&language)
        .into()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_count(value: i64) -> String {
    group_digits(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub finished: bool,
}

/// Timing for one counter. The first sampled timestamp is the start.
#[derive(Debug, Clone)]
pub struct CounterTrack {
    target: i64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CounterTrack {
    pub fn new(target: i64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn sample(&mut self, now: f64) -> CounterFrame {
        let start = *self.started_at.get_or_insert(now);
        let progress = if self.duration_ms > 0.0 {
            ((now - start) / self.duration_ms).min(1.0)
        } else {
            1.0
        };
        let value = (ease_out_expo(progress) * self.target as f64).floor() as i64;
        CounterFrame {
            value,
            finished: progress >= 1.0,
        }
    }
}

/// The "counters already ran" flag. Set by the first sighting after an
/// arm, cleared by returning to the home page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CounterGate {
    started: bool,
}

impl CounterGate {
    pub fn has_run(&self) -> bool {
        self.started
    }

    /// True exactly once per armed period.
    pub fn try_start(&mut self) -> bool {
        if self.started {
            false
        } else {
            self.started = true;
            true
        }
    }

    pub fn reset(&mut self) {
        self.started = false;
    }
}

struct CounterRun {
    element: Element,
    track: RefCell<CounterTrack>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl CounterRun {
    fn start(element: Element, duration_ms: f64) -> Rc<Self> {
        let target = dom::int_attr(&element, anchors::COUNTER_TARGET);
        dom::remove_class(&element, "done");
        dom::add_class(&element, "counting");
        let run = Rc::new(Self {
            element,
            track: RefCell::new(CounterTrack::new(target, duration_ms)),
            frame: RefCell::new(None),
        });
        run.schedule();
        run
    }

    fn cancel(&self) {
        self.frame.borrow_mut().take();
    }

    fn schedule(self: &Rc<Self>) {
        let run = Rc::clone(self);
        let handle = request_animation_frame(move |now| run.tick(now));
        *self.frame.borrow_mut() = Some(handle);
    }

    fn tick(self: &Rc<Self>, now: f64) {
        let frame = self.track.borrow_mut().sample(now);
        if frame.finished {
            self.frame.borrow_mut().take();
            let target = self.track.borrow().target();
            self.element
                .set_text_content(Some(&format!("{}+", format_count(target))));
            dom::remove_class(&self.element, "counting");
            dom::add_class(&self.element, "done");
        } else {
            self.element
                .set_text_content(Some(&format_count(frame.value)));
            self.schedule();
        }
    }
}

struct AnimatorInner {
    gate: Cell<CounterGate>,
    watcher: RefCell<Option<ViewportWatcher>>,
    runs: RefCell<Vec<Rc<CounterRun>>>,
    duration_ms: f64,
    options: WatchOptions,
}

/// Runs the counters once the impact section scrolls into view.
#[derive(Clone)]
pub struct CounterAnimator {
    inner: Rc<AnimatorInner>,
}

impl CounterAnimator {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            inner: Rc::new(AnimatorInner {
                gate: Cell::new(CounterGate::default()),
                watcher: RefCell::new(None),
                runs: RefCell::new(Vec::new()),
                duration_ms: config.counter_duration_ms,
                options: WatchOptions::threshold(config.counter_threshold),
            }),
        }
    }

    pub fn has_run(&self) -> bool {
        self.inner.gate.get().has_run()
    }

    pub fn reset(&self) {
        let mut gate = self.inner.gate.get();
        gate.reset();
        self.inner.gate.set(gate);
    }

    /// Watches the impact section, replacing any earlier watch.
    pub fn arm(&self, document: &Document) -> SiteResult<()> {
        let section = dom::by_id(document, anchors::IMPACT_SECTION)?;
        // Drop the old watcher first so it disconnects before the new one
        // starts reporting.
        self.inner.watcher.borrow_mut().take();

        let animator = self.clone();
        let watcher = ViewportWatcher::new(&self.inner.options, move |sighting| {
            if sighting.visible {
                animator.on_sighting();
            }
            Watch::Continue
        })?;
        watcher.observe(&section);
        *self.inner.watcher.borrow_mut() = Some(watcher);
        Ok(())
    }

    /// Claims the run for the current armed period. True at most once until
    /// the next [`reset`](Self::reset).
    pub fn try_start(&self) -> bool {
        let mut gate = self.inner.gate.get();
        let start = gate.try_start();
        self.inner.gate.set(gate);
        start
    }

    fn on_sighting(&self) {
        if self.try_start() {
            if let Err(err) = self.animate_counters() {
                err.log("counters");
            }
        }
    }

    /// Starts every `.counter` on the page from zero, cancelling runs still
    /// in flight.
    pub fn animate_counters(&self) -> SiteResult<usize> {
        let document = dom::document()?;
        for run in self.inner.runs.borrow_mut().drain(..) {
            run.cancel();
        }
        let runs: Vec<_> = dom::query_all_in(&document, anchors::COUNTER)
            .into_iter()
            .map(|el| CounterRun::start(el.into(), self.inner.duration_ms))
            .collect();
        let count = runs.len();
        *self.inner.runs.borrow_mut() = runs;
        log::debug!("Animating {} counters", count);
        Ok(count)
    }
}
