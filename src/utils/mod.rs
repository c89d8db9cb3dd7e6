//! # Utilities Module
//!
//! Shared helpers for the encounter system, primarily the seeded random
//! stream that all run-level randomness flows through.

pub mod rng;

pub use rng::*;
