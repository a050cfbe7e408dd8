//! Test module for route-core
//!
//! This module contains property-based tests using proptest and async
//! tests for the guard pipeline.


#[cfg(test)]
pub mod location_tests;
