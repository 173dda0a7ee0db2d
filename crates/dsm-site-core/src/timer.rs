//! Time sources.
//!
//! The browser side implements these with `gloo_timers` and `js_sys::Date`;
//! tests drive a virtual clock.

use std::time::Duration;

/// One-shot timer source.
///
/// Dropping a returned handle must cancel the task if it has not fired yet.
/// Controllers rely on this: they cancel a timer by letting go of its handle.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Wall clock in Unix milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Clamp a duration to the `u32` millisecond range browser timers accept.
pub fn millis_u32(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}
