//! Frame clocks
//!
//! A frame clock yields one monotonically increasing timestamp per frame,
//! in seconds. The scheduler only ever subtracts consecutive samples, so
//! the origin is arbitrary; both clocks here measure from their creation.
//! A clock that goes backward or yields NaN is broken — that is a bug in
//! the clock, not something the runtime defends against.

use std::thread;
use std::time::{Duration, Instant};

/// Source of successive frame timestamps, in seconds
pub trait FrameClock {
    /// Wait for (or synthesize) the next frame and return its timestamp.
    fn next_frame(&mut self) -> f32;
}

/// Wall-clock frames paced to a target rate.
///
/// Sleeps until the next frame boundary relative to clock creation, so
/// long callbacks eat into the pacing budget rather than drifting the
/// timestamp origin.
pub struct SystemClock {
    origin: Instant,
    target_fps: u32,
    last: f32,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::with_fps(120)
    }

    pub fn with_fps(target_fps: u32) -> Self {
        debug_assert!(target_fps > 0, "frame rate must be non-zero");
        Self {
            origin: Instant::now(),
            target_fps,
            last: 0.0,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn next_frame(&mut self) -> f32 {
        let interval = 1.0 / self.target_fps as f32;
        let target = self.last + interval;
        let now = self.origin.elapsed().as_secs_f32();
        if target > now {
            thread::sleep(Duration::from_secs_f32(target - now));
        }
        self.last = self.origin.elapsed().as_secs_f32();
        self.last
    }
}

/// Deterministic clock advancing a fixed step per frame.
///
/// For tests and offline stepping: frames are synthesized immediately, no
/// sleeping involved.
pub struct ManualClock {
    now: f32,
    step: f32,
}

impl ManualClock {
    pub fn new(step: f32) -> Self {
        debug_assert!(step > 0.0, "frame step must be positive");
        Self { now: 0.0, step }
    }

    /// Timestamp of the most recently issued frame.
    pub fn now(&self) -> f32 {
        self.now
    }
}

impl FrameClock for ManualClock {
    fn next_frame(&mut self) -> f32 {
        self.now += self.step;
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_steps_deterministically() {
        let mut clock = ManualClock::new(0.25);
        assert_eq!(clock.next_frame(), 0.25);
        assert_eq!(clock.next_frame(), 0.5);
        assert_eq!(clock.now(), 0.5);
    }

    #[test]
    fn system_clock_is_strictly_increasing() {
        let mut clock = SystemClock::with_fps(1000);
        let first = clock.next_frame();
        let second = clock.next_frame();
        assert!(second > first);
        assert!(first > 0.0);
    }
}
