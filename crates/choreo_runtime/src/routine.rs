//! Cooperative routines
//!
//! A routine is a resumable procedure: each call to `resume` advances it to
//! its next suspension point and returns what it is waiting on. The only
//! suspension points are the next frame timestamp and the completion of a
//! nested routine; everything in between runs synchronously.

/// Input fed into a routine when it resumes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resume {
    /// First resume after the routine is spawned
    Start,
    /// A frame timestamp in seconds, answering [`Yield::NextFrame`]
    Frame(f32),
    /// The nested routine requested via [`Yield::Call`] ran to completion
    Finished,
}

/// What a routine is suspended on
pub enum Yield {
    /// Suspend until the next frame timestamp is available
    NextFrame,
    /// Run a nested routine to completion, then resume this one with
    /// [`Resume::Finished`]
    Call(Box<dyn Routine>),
    /// The routine is complete
    Done,
}

/// A resumable, frame-synchronous procedure
pub trait Routine {
    fn resume(&mut self, input: Resume) -> Yield;
}

impl<F> Routine for F
where
    F: FnMut(Resume) -> Yield,
{
    fn resume(&mut self, input: Resume) -> Yield {
        self(input)
    }
}
