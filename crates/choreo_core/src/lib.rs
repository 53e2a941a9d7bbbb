//! Choreo Animation Core
//!
//! This crate provides the task algebra for frame-synchronous choreography:
//!
//! - **Tasks**: timed, one-shot, and condition-waiting units of work driven
//!   by `update(dt)` / `is_done()`
//! - **Combinators**: sequential and concurrent composition
//! - **Interpolators**: linear, sine ease-in-out, exponential decay
//! - **Shared values**: [`Var`] scalars mutated by tweens, [`Latch`] flags
//!   set by external event callbacks
//!
//! # Example
//!
//! ```rust
//! use choreo_core::{Task, Tween, Var};
//!
//! let x = Var::new(0.0);
//! let mut anim = Task::sequence(vec![
//!     Task::wait(1.0),
//!     Task::tween(x.clone(), Tween::to(100.0).duration(2.0)),
//! ]);
//!
//! // One update per rendered frame.
//! anim.update(1.0);
//! anim.update(1.0);
//! anim.update(1.0);
//!
//! assert!(anim.is_done());
//! assert_eq!(x.get(), 100.0);
//! ```

pub mod error;
pub mod interp;
pub mod task;
pub mod value;

pub use error::{ChoreoError, Result};
pub use interp::{lerp, Interpolator};
pub use task::{progress, MoveTo, Task, Tween};
pub use value::{Latch, Var};
