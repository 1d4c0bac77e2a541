//! Shared types for the NLP examples workspace

pub mod types;

pub use types::*;
