//! depsnap benchmarking suite
//!
//! Benchmarks for graph walking, manifest aggregation and rendering.

pub mod common;

pub use common::*;
