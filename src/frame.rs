use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};

/// Coalesces bursts of events (scroll, mostly) into one callback per
/// animation frame. Calls made while a frame is already pending are dropped.
#[derive(Clone, Default)]
pub struct FrameThrottle {
    pending: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn run<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        if self.is_pending() {
            return;
        }
        let pending = Rc::clone(&self.pending);
        let handle = request_animation_frame(move |_| {
            pending.borrow_mut().take();
            callback();
        });
        *self.pending.borrow_mut() = Some(handle);
    }
}
