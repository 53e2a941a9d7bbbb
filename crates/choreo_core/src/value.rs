//! Shared animated scalars and write-once latches
//!
//! The engine is single-threaded and frame-synchronous: all mutation happens
//! inside one per-frame dispatch, so shared state is plain `Rc<Cell<_>>`
//! with no locking.

use std::cell::Cell;
use std::rc::Rc;

/// A shared animatable scalar field, e.g. a sprite's `x` or a font size.
///
/// Cloning yields another handle to the same field. Tweens write through
/// their handle every tick; an external writer to the same field simply
/// wins whichever assignment lands last (used deliberately to snap a value
/// mid-flight).
#[derive(Clone, Debug, Default)]
pub struct Var(Rc<Cell<f32>>);

impl Var {
    pub fn new(value: f32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }

    pub fn set(&self, value: f32) {
        self.0.set(value);
    }
}

/// A write-once boolean flag set by an external event callback.
///
/// Condition tasks poll it every tick. It must exist (and be subscribed)
/// before the event can possibly fire: the latch records state, it does not
/// detect edges retroactively.
#[derive(Clone, Debug, Default)]
pub struct Latch(Rc<Cell<bool>>);

impl Latch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the latch. Idempotent; a latch never resets.
    pub fn set(&self) {
        self.0.set(true);
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_handles_share_one_field() {
        let a = Var::new(1.0);
        let b = a.clone();
        b.set(4.0);
        assert_eq!(a.get(), 4.0);
    }

    #[test]
    fn latch_stays_set() {
        let latch = Latch::new();
        assert!(!latch.is_set());
        latch.set();
        latch.set();
        assert!(latch.is_set());
    }
}
