//! Shared types and errors used across the crate

pub mod errors;
pub mod types;
