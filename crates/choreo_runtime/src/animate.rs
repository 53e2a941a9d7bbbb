//! Per-frame animation driver
//!
//! [`Animate`] is the routine behind every frame loop: it awaits one frame
//! to establish a previous timestamp, then invokes its callback once per
//! frame with the measured delta time until the callback asks to stop.

use choreo_core::Task;

use crate::routine::{Resume, Routine, Yield};

/// Whether the frame loop keeps running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Routine invoking a callback once per frame with the frame's delta time
pub struct Animate<F> {
    callback: F,
    before: Option<f32>,
}

impl<F> Animate<F>
where
    F: FnMut(f32) -> FrameControl,
{
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            before: None,
        }
    }
}

impl<F> Routine for Animate<F>
where
    F: FnMut(f32) -> FrameControl,
{
    fn resume(&mut self, input: Resume) -> Yield {
        match input {
            Resume::Start | Resume::Finished => Yield::NextFrame,
            Resume::Frame(now) => {
                let Some(before) = self.before else {
                    // Priming frame: establishes the previous timestamp.
                    self.before = Some(now);
                    return Yield::NextFrame;
                };
                let dt = now - before;
                self.before = Some(now);
                match (self.callback)(dt) {
                    FrameControl::Continue => Yield::NextFrame,
                    FrameControl::Stop => Yield::Done,
                }
            }
        }
    }
}

/// Drive a root task graph to completion, one `update` per frame.
pub fn drive_task(mut task: Task) -> Animate<impl FnMut(f32) -> FrameControl> {
    Animate::new(move |dt| {
        task.update(dt);
        if task.is_done() {
            FrameControl::Stop
        } else {
            FrameControl::Continue
        }
    })
}
