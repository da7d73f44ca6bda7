//! Utility modules
//!
//! Error types and logging helpers

pub mod error;
pub mod logging;
