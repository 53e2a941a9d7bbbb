//! Choreo Cooperative Runtime
//!
//! Single-threaded, frame-synchronous execution for the task algebra in
//! `choreo_core`:
//!
//! - **Routines**: resumable procedures with explicit suspension points
//!   (await the next frame, or delegate to a nested routine)
//! - **Scheduler**: a stack interpreter that drains nested routines
//!   depth-first before their parents resume
//! - **Frame clocks**: wall-clock pacing or deterministic stepping
//! - **Animate driver**: per-frame callback loop with measured delta time
//! - **Runtime**: any number of sibling top-level runs fed from one clock
//! - **Input routing**: keyboard subscriptions backing wait-for-key tasks
//!
//! # Example
//!
//! ```rust
//! use choreo_core::Task;
//! use choreo_runtime::{drive_task, ManualClock, Runtime};
//!
//! let mut runtime = Runtime::new(ManualClock::new(0.5));
//! let id = runtime.spawn(Box::new(drive_task(Task::wait(1.0))));
//! runtime.run();
//! assert!(!runtime.is_running(id));
//! ```

pub mod animate;
pub mod clock;
pub mod input;
pub mod routine;
pub mod runtime;
pub mod scheduler;

pub use animate::{drive_task, Animate, FrameControl};
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use input::InputRouter;
pub use routine::{Resume, Routine, Yield};
pub use runtime::{RunId, Runtime};
pub use scheduler::{Diagnostics, Scheduler};
