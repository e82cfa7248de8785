//! Blaze Runner
//!
//! Submits user code to a remote execution service and polls it until the
//! job reaches a terminal state.
//!
//! Architecture:
//! - Configuration: service location, credentials and poll policy
//! - Repository: the `ExecutionBackend` seam over the remote service
//! - Scheduler: the poll state machine and the `Pause` primitive it waits on
//!
//! Each call to [`JobPoller::submit`] is a single linear task that owns its
//! job handle and attempt counter, so concurrent callers never share state.

pub mod config;
pub mod error;
pub mod repository;
pub mod scheduler;

pub use config::Config;
pub use error::RunError;
pub use repository::ExecutionBackend;
pub use scheduler::{ImmediatePause, JobPoller, Pause, TokioPause};
pub use tokio_util::sync::CancellationToken;
