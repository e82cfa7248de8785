//! Core domain types
//!
//! These types describe a code-execution job independently of how it is
//! transported. They are shared between the API server (which validates
//! incoming requests) and the poller (which drives jobs to completion).

pub mod identity;
pub mod job;
pub mod language;
