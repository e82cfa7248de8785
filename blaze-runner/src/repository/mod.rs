//! Repository layer
//!
//! Abstracts communication with the remote execution service behind a
//! trait so the poller can run against stubs in tests.

mod execution;

pub use execution::ExecutionBackend;
