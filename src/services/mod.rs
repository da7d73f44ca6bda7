//! Service layer module
//!
//! Outbound communication with the odds provider

pub mod client;

pub use client::{OddsClient, UpstreamBody};
