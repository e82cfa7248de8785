//! Data Transfer Objects
//!
//! Wire shapes for the remote execution service (`judge0`) and for the
//! Blaze HTTP API (`run`, `envelope`).

pub mod envelope;
pub mod judge0;
pub mod run;
