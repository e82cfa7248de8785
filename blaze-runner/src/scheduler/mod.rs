//! Scheduler layer
//!
//! Drives a job from submission to a terminal status. The wait between
//! status queries goes through the `Pause` trait so the state machine does
//! not depend on a particular timer.

mod pause;
pub mod poller;

pub use pause::{ImmediatePause, Pause, TokioPause};
pub use poller::JobPoller;
