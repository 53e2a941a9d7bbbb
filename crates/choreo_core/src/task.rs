//! The task algebra
//!
//! A [`Task`] is a unit of schedulable, time-driven work: it receives
//! `update(dt)` once per tick from its owner and reports completion through
//! `is_done()`. Leaf tasks measure elapsed time or run one-shot actions;
//! combinators compose child tasks sequentially or concurrently.
//!
//! Topology is fixed at construction. A task is "cancelled" structurally:
//! its owner stops calling `update` and drops it. Faults raised by task
//! callbacks propagate out of `update` — combinators never swallow a child
//! panic.

use crate::interp::Interpolator;
use crate::value::{Latch, Var};

/// Normalized progress for a duration-based task.
///
/// Returns `1.0` once `elapsed` reaches `duration`, `0.0` for non-positive
/// elapsed time, and `elapsed / duration` in between. A zero duration
/// therefore reports full progress on the very first update, which is what
/// makes zero-duration tasks complete immediately.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if elapsed >= duration {
        return 1.0;
    }
    if elapsed <= 0.0 {
        return 0.0;
    }
    elapsed / duration
}

/// Per-step callback of a timed task: `(step, dt)`
pub type StepFn = Box<dyn FnMut(f32, f32)>;

/// One-shot action, handed the delta time of the tick it runs on
pub type ActionFn = Box<dyn FnOnce(f32)>;

/// Configuration for [`Task::tween`]
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    /// Value the field is driven toward
    pub to: f32,
    /// Duration in seconds
    pub duration: f32,
    /// Explicit start value; captured from the field on first update if
    /// absent
    pub from: Option<f32>,
    pub interpolator: Interpolator,
}

impl Tween {
    pub fn to(to: f32) -> Self {
        Self {
            to,
            duration: 0.0,
            from: None,
            interpolator: Interpolator::default(),
        }
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn from(mut self, value: f32) -> Self {
        self.from = Some(value);
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }
}

/// Configuration for [`Task::move_to`]
#[derive(Clone, Copy, Debug)]
pub struct MoveTo {
    pub dest: (f32, f32),
    pub duration: f32,
    pub from: Option<(f32, f32)>,
    pub interpolator: Interpolator,
}

impl MoveTo {
    pub fn dest(x: f32, y: f32) -> Self {
        Self {
            dest: (x, y),
            duration: 0.0,
            from: None,
            interpolator: Interpolator::exp_decay(),
        }
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn from(mut self, x: f32, y: f32) -> Self {
        self.from = Some((x, y));
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }
}

/// A unit of schedulable work, as a closed set of kinds
pub enum Task {
    Timed(TimedTask),
    Instant(InstantTask),
    Condition(ConditionTask),
    Sequence(SequenceTask),
    Concurrent(ConcurrentTask),
    Tween(TweenTask),
}

impl Task {
    /// A task that completes after `seconds` of elapsed time.
    pub fn wait(seconds: f32) -> Self {
        debug_assert!(seconds >= 0.0, "task duration must be non-negative");
        Task::Timed(TimedTask {
            time: 0.0,
            duration: seconds,
            on_step: None,
        })
    }

    /// A zero-duration task: done on its first update.
    pub fn no_op() -> Self {
        Self::wait(0.0)
    }

    /// A fixed-duration task invoking `on_step(step, dt)` every tick, where
    /// `step` is the normalized progress after the tick.
    pub fn timed(duration: f32, on_step: impl FnMut(f32, f32) + 'static) -> Self {
        debug_assert!(duration >= 0.0, "task duration must be non-negative");
        Task::Timed(TimedTask {
            time: 0.0,
            duration,
            on_step: Some(Box::new(on_step)),
        })
    }

    /// A one-shot action, executed exactly once on the first update.
    pub fn do_once(action: impl FnOnce(f32) + 'static) -> Self {
        Task::Instant(InstantTask {
            action: Some(Box::new(action)),
        })
    }

    /// A task that completes once `latch` has been set by its side channel.
    ///
    /// Never completes if the latch is never tripped; used deliberately to
    /// block a sequence until an external event arrives.
    pub fn wait_latch(latch: Latch) -> Self {
        Task::Condition(ConditionTask { latch })
    }

    /// Sequential composition: children run one after another, in
    /// construction order.
    pub fn sequence(tasks: Vec<Task>) -> Self {
        let mut remaining = tasks;
        // Stored reversed so the next child to run is the removable tail.
        remaining.reverse();
        Task::Sequence(SequenceTask { remaining })
    }

    /// Concurrent composition: every child is advanced each tick until it
    /// completes. An empty set is done immediately.
    pub fn concurrent(tasks: Vec<Task>) -> Self {
        Task::Concurrent(ConcurrentTask { running: tasks })
    }

    /// Drive `target` toward `cfg.to` over `cfg.duration` seconds.
    pub fn tween(target: Var, cfg: Tween) -> Self {
        debug_assert!(cfg.duration >= 0.0, "task duration must be non-negative");
        Task::Tween(TweenTask {
            time: 0.0,
            duration: cfg.duration,
            target,
            start: cfg.from,
            end: cfg.to,
            interpolator: cfg.interpolator,
        })
    }

    /// Drive an `(x, y)` pair of fields toward a destination, as two
    /// concurrent tweens.
    pub fn move_to(x: Var, y: Var, cfg: MoveTo) -> Self {
        let (from_x, from_y) = match cfg.from {
            Some((fx, fy)) => (Some(fx), Some(fy)),
            None => (None, None),
        };
        Self::concurrent(vec![
            Self::tween(
                x,
                Tween {
                    to: cfg.dest.0,
                    duration: cfg.duration,
                    from: from_x,
                    interpolator: cfg.interpolator,
                },
            ),
            Self::tween(
                y,
                Tween {
                    to: cfg.dest.1,
                    duration: cfg.duration,
                    from: from_y,
                    interpolator: cfg.interpolator,
                },
            ),
        ])
    }

    /// Advance the task by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        match self {
            Task::Timed(t) => t.update(dt),
            Task::Instant(t) => t.update(dt),
            Task::Condition(t) => t.update(dt),
            Task::Sequence(t) => t.update(dt),
            Task::Concurrent(t) => t.update(dt),
            Task::Tween(t) => t.update(dt),
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Task::Timed(t) => t.is_done(),
            Task::Instant(t) => t.is_done(),
            Task::Condition(t) => t.is_done(),
            Task::Sequence(t) => t.is_done(),
            Task::Concurrent(t) => t.is_done(),
            Task::Tween(t) => t.is_done(),
        }
    }

    /// Fixed duration in seconds, for the duration-based kinds.
    pub fn duration(&self) -> Option<f32> {
        match self {
            Task::Timed(t) => Some(t.duration),
            Task::Tween(t) => Some(t.duration),
            _ => None,
        }
    }

    /// Elapsed time in seconds, for the duration-based kinds.
    pub fn elapsed(&self) -> Option<f32> {
        match self {
            Task::Timed(t) => Some(t.time),
            Task::Tween(t) => Some(t.time),
            _ => None,
        }
    }
}

/// Fixed-duration task with an optional per-step callback
pub struct TimedTask {
    time: f32,
    duration: f32,
    on_step: Option<StepFn>,
}

impl TimedTask {
    fn update(&mut self, dt: f32) {
        self.time += dt;
        if let Some(on_step) = self.on_step.as_mut() {
            let step = progress(self.time, self.duration);
            on_step(step, dt);
        }
    }

    fn is_done(&self) -> bool {
        self.time >= self.duration
    }
}

/// One-shot action task
pub struct InstantTask {
    action: Option<ActionFn>,
}

impl InstantTask {
    fn update(&mut self, dt: f32) {
        if let Some(action) = self.action.take() {
            action(dt);
        }
    }

    fn is_done(&self) -> bool {
        self.action.is_none()
    }
}

/// Task waiting on an externally set latch
pub struct ConditionTask {
    latch: Latch,
}

impl ConditionTask {
    fn update(&mut self, _dt: f32) {}

    fn is_done(&self) -> bool {
        self.latch.is_set()
    }
}

/// Sequential combinator
pub struct SequenceTask {
    // Reversed: the next child to run is the last element.
    remaining: Vec<Task>,
}

impl SequenceTask {
    fn update(&mut self, dt: f32) {
        let Some(current) = self.remaining.last_mut() else {
            return;
        };
        current.update(dt);
        if current.is_done() {
            // Removed permanently; a popped child is never revisited even
            // if its doneness condition could flip back.
            self.remaining.pop();
        }
    }

    fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Concurrent combinator
pub struct ConcurrentTask {
    running: Vec<Task>,
}

impl ConcurrentTask {
    fn update(&mut self, dt: f32) {
        // Each child is updated exactly once per tick; doneness is checked
        // strictly after that child's own update.
        self.running.retain_mut(|task| {
            task.update(dt);
            !task.is_done()
        });
    }

    fn is_done(&self) -> bool {
        self.running.is_empty()
    }
}

/// Interpolated-field task: tweens one shared scalar toward a target value
pub struct TweenTask {
    time: f32,
    duration: f32,
    target: Var,
    start: Option<f32>,
    end: f32,
    interpolator: Interpolator,
}

impl TweenTask {
    fn update(&mut self, dt: f32) {
        self.time += dt;
        // Captured exactly once; the field is never read again afterwards,
        // so an external writer to the same field wins the race field-wise.
        let start = match self.start {
            Some(start) => start,
            None => {
                let start = self.target.get();
                self.start = Some(start);
                start
            }
        };
        let step = match self.interpolator {
            // Decay-rate kind: driven by raw elapsed time.
            Interpolator::ExpDecay { .. } => self.time,
            _ => progress(self.time, self.duration),
        };
        self.target.set(self.interpolator.apply(start, self.end, step));
    }

    fn is_done(&self) -> bool {
        self.time >= self.duration
    }
}
