//! Shared building blocks used across the crate.

pub mod constraint;
pub mod solve;
pub mod units;
