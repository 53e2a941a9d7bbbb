//! Top-level run management
//!
//! A [`Runtime`] owns one frame clock and any number of sibling top-level
//! runs. Every frame, each pending run receives the same timestamp; runs
//! share no state beyond whatever their tasks were explicitly given, and
//! all of them execute synchronously inside one frame dispatch.

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::clock::FrameClock;
use crate::routine::{Resume, Routine};
use crate::scheduler::{Diagnostics, Scheduler};

new_key_type! {
    /// Handle to a spawned top-level run
    pub struct RunId;
}

/// Frame-synchronous executor for sibling scheduler runs
pub struct Runtime<C: FrameClock> {
    clock: C,
    runs: SlotMap<RunId, Scheduler>,
}

impl<C: FrameClock> Runtime<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            runs: SlotMap::with_key(),
        }
    }

    /// Spawn a top-level run and advance it to its first suspension point.
    ///
    /// A routine that completes without awaiting a frame is finished by the
    /// time `spawn` returns and its id is already stale.
    pub fn spawn(&mut self, routine: Box<dyn Routine>) -> RunId {
        self.insert(Scheduler::new(routine))
    }

    /// Spawn with a diagnostics sink attached to the run.
    pub fn spawn_with_diagnostics(
        &mut self,
        routine: Box<dyn Routine>,
        sink: Box<dyn Diagnostics>,
    ) -> RunId {
        self.insert(Scheduler::with_diagnostics(routine, sink))
    }

    fn insert(&mut self, mut run: Scheduler) -> RunId {
        let pending = run.resume(Resume::Start);
        let id = self.runs.insert(run);
        trace!(?id, "run spawned");
        if !pending {
            self.runs.remove(id);
            trace!(?id, "run finished at spawn");
        }
        id
    }

    /// Whether the run behind `id` is still pending.
    pub fn is_running(&self, id: RunId) -> bool {
        self.runs.contains_key(id)
    }

    /// Number of pending runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Pull one frame from the clock and resume every pending run with it.
    ///
    /// Returns the number of runs still pending afterwards.
    pub fn tick(&mut self) -> usize {
        let timestamp = self.clock.next_frame();
        let mut finished = Vec::new();
        for (id, run) in self.runs.iter_mut() {
            if !run.resume(Resume::Frame(timestamp)) {
                finished.push(id);
            }
        }
        for id in finished {
            self.runs.remove(id);
            trace!(?id, timestamp, "run finished");
        }
        self.runs.len()
    }

    /// Drive frames until no runs remain.
    pub fn run(&mut self) {
        while self.tick() > 0 {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animate::{drive_task, Animate, FrameControl};
    use crate::clock::ManualClock;
    use choreo_core::{Task, Tween, Var};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn runs_a_task_to_completion() {
        let x = Var::new(0.0);
        let mut runtime = Runtime::new(ManualClock::new(0.5));
        let id = runtime.spawn(Box::new(drive_task(Task::tween(
            x.clone(),
            Tween::to(100.0).duration(2.0).from(0.0),
        ))));

        assert!(runtime.is_running(id));
        runtime.run();
        assert!(!runtime.is_running(id));
        assert!(runtime.is_empty());
        assert_eq!(x.get(), 100.0);
    }

    #[test]
    fn door_sequence_end_to_end() {
        let door_x = Var::new(0.0);
        let open = Rc::new(Cell::new(false));
        let open_in = open.clone();
        let sequence = Task::sequence(vec![
            Task::wait(1.0),
            Task::tween(door_x.clone(), Tween::to(100.0).duration(2.0).from(0.0)),
            Task::do_once(move |_| open_in.set(true)),
        ]);

        let mut runtime = Runtime::new(ManualClock::new(0.5));
        runtime.spawn(Box::new(drive_task(sequence)));
        runtime.run();

        assert_eq!(door_x.get(), 100.0);
        assert!(open.get());
    }

    #[test]
    fn sibling_runs_share_each_frame() {
        let frames_a = Rc::new(Cell::new(0));
        let frames_b = Rc::new(Cell::new(0));
        let (a, b) = (frames_a.clone(), frames_b.clone());

        let mut runtime = Runtime::new(ManualClock::new(1.0));
        let short = runtime.spawn(Box::new(Animate::new(move |_dt| {
            a.set(a.get() + 1);
            if a.get() == 2 {
                FrameControl::Stop
            } else {
                FrameControl::Continue
            }
        })));
        let long = runtime.spawn(Box::new(Animate::new(move |_dt| {
            b.set(b.get() + 1);
            if b.get() == 4 {
                FrameControl::Stop
            } else {
                FrameControl::Continue
            }
        })));

        // Priming frame, then both callbacks run each frame.
        runtime.tick();
        runtime.tick();
        runtime.tick();
        assert!(!runtime.is_running(short));
        assert!(runtime.is_running(long));
        assert_eq!((frames_a.get(), frames_b.get()), (2, 2));

        runtime.run();
        assert!(!runtime.is_running(long));
        assert_eq!(frames_b.get(), 4);
    }

    #[test]
    fn immediately_finished_run_is_not_retained() {
        let mut runtime = Runtime::new(ManualClock::new(1.0));
        let id = runtime.spawn(Box::new(|_input: Resume| crate::routine::Yield::Done));
        assert!(!runtime.is_running(id));
        assert!(runtime.is_empty());
    }
}
