//! Cooperative scheduler
//!
//! Drives one top-level routine as an explicit call stack of suspended
//! continuations. When a routine yields a nested routine, the nested one is
//! pushed and fully drained — across as many frames as it needs — before
//! the parent resumes. This keeps the interleaving strictly depth-first and
//! single-threaded, and makes error propagation through nested levels plain
//! stack unwinding.

use tracing::trace;

use crate::routine::{Resume, Routine, Yield};

/// Observer for scheduler activity.
///
/// Injected at construction and discarded with the run; all hooks default
/// to no-ops so sinks implement only what they care about.
pub trait Diagnostics {
    /// A nested routine was pushed; `depth` is the stack depth after the
    /// push (the top-level routine is depth 1).
    fn on_call(&mut self, _depth: usize) {}
    /// The routine at `depth` finished and was popped.
    fn on_return(&mut self, _depth: usize) {}
    /// The scheduler suspended at `depth` waiting for a frame.
    fn on_suspend(&mut self, _depth: usize) {}
    /// A frame timestamp was fed in.
    fn on_frame(&mut self, _timestamp: f32) {}
}

/// Stack interpreter over suspended routines
pub struct Scheduler {
    stack: Vec<Box<dyn Routine>>,
    diagnostics: Option<Box<dyn Diagnostics>>,
}

impl Scheduler {
    pub fn new(root: Box<dyn Routine>) -> Self {
        Self {
            stack: vec![root],
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(root: Box<dyn Routine>, sink: Box<dyn Diagnostics>) -> Self {
        Self {
            stack: vec![root],
            diagnostics: Some(sink),
        }
    }

    /// Whether the run has completed (no suspended routines remain).
    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Current call-stack depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Feed one resume input and drive the stack until it either suspends
    /// on the next frame (`true`) or empties (`false`).
    ///
    /// The first input must be [`Resume::Start`]; afterwards the caller
    /// feeds one [`Resume::Frame`] per frame. Panics from routine code
    /// unwind through this call untouched.
    pub fn resume(&mut self, input: Resume) -> bool {
        if let Resume::Frame(timestamp) = input {
            if let Some(sink) = self.diagnostics.as_mut() {
                sink.on_frame(timestamp);
            }
        }

        let mut input = input;
        loop {
            let step = match self.stack.last_mut() {
                Some(top) => top.resume(input),
                None => return false,
            };
            match step {
                Yield::NextFrame => {
                    if let Some(sink) = self.diagnostics.as_mut() {
                        sink.on_suspend(self.stack.len());
                    }
                    return true;
                }
                Yield::Call(routine) => {
                    self.stack.push(routine);
                    trace!(depth = self.stack.len(), "routine call");
                    if let Some(sink) = self.diagnostics.as_mut() {
                        sink.on_call(self.stack.len());
                    }
                    input = Resume::Start;
                }
                Yield::Done => {
                    self.stack.pop();
                    trace!(depth = self.stack.len() + 1, "routine done");
                    if let Some(sink) = self.diagnostics.as_mut() {
                        sink.on_return(self.stack.len() + 1);
                    }
                    if self.stack.is_empty() {
                        return false;
                    }
                    input = Resume::Finished;
                }
            }
        }
    }
}
