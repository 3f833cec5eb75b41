//! Tick scheduler adapter
//!
//! The engine never owns a clock. It asks the embedding environment for one
//! future invocation after each accepted tick and cancels on pause/end, so
//! the simulation stays single-threaded and portable.

/// Request-one-future-invocation primitive with matching cancellation
pub trait TickScheduler {
    /// Ask for one more engine callback. Idempotent while a request is pending.
    fn request(&mut self);
    /// Drop any pending request so no further callbacks arrive.
    fn cancel(&mut self);
}

/// requestAnimationFrame-backed scheduler (wasm only).
///
/// The browser loop in `main.rs` keeps the rAF chain alive; this adapter
/// gates whether a frame callback is allowed to advance the engine, which
/// is the cancellation semantic the engine needs.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct AnimationFrameScheduler {
    armed: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(target_arch = "wasm32")]
impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared flag the frame loop consults before driving the engine
    pub fn armed_flag(&self) -> std::rc::Rc<std::cell::Cell<bool>> {
        self.armed.clone()
    }
}

#[cfg(target_arch = "wasm32")]
impl TickScheduler for AnimationFrameScheduler {
    fn request(&mut self) {
        self.armed.set(true);
    }

    fn cancel(&mut self) {
        self.armed.set(false);
    }
}

/// Counting scheduler for tests: records request/cancel traffic through
/// shared cells so the test keeps a handle after the engine takes ownership.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct CountingScheduler {
    pub requests: std::rc::Rc<std::cell::Cell<u32>>,
    pub cancels: std::rc::Rc<std::cell::Cell<u32>>,
}

#[cfg(test)]
impl TickScheduler for CountingScheduler {
    fn request(&mut self) {
        self.requests.set(self.requests.get() + 1);
    }

    fn cancel(&mut self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}
