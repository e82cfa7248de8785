//! Blaze Core
//!
//! Core types shared by the Blaze code runner crates.
//!
//! This crate contains:
//! - Domain types: languages, job requests, job status and results
//! - DTOs: the Judge0 wire format and the caller-facing request/response shapes

pub mod domain;
pub mod dto;
