//! Data model module
//!
//! Response envelope and inbound query types

pub mod envelope;
pub mod query;

pub use envelope::Envelope;
pub use query::{OddsQuery, QueryParams, SportsQuery};
