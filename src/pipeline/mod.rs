//! Pipeline entry points.
//!
//! - `PollLoop::run`: poll forever until shutdown
//! - `PollLoop::run_cycle`: a single fetch/notify cycle

pub mod poll;

pub use poll::{CycleOutcome, PollLoop};
