//! ekho-core
//!
//! Canonical report types, request configuration, and the input adapter
//! that maps arbitrary/legacy payloads onto one normalized shape.
//! No I/O — this is the shared vocabulary of the ekho pipeline.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
