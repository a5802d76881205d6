//! CLI command implementations.

pub mod align;
pub mod combine;
pub mod common;
pub mod correlate;
pub mod merge;
