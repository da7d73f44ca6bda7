//! Response envelope
//!
//! Every JSON body the proxy returns is an [`Envelope`]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized response wrapper
///
/// `ok` is always present; every other field is omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the request succeeded
    pub ok: bool,
    /// Upstream status code on upstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw upstream text when it could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Service name (health check only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markets: Option<String>,
    /// Element count when `data` is an array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Provider payload, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Successful envelope carrying a provider payload
    pub fn success(data: Value) -> Self {
        let count = data.as_array().map(Vec::len);
        Self {
            ok: true,
            count,
            data: Some(data),
            ..Default::default()
        }
    }

    /// Failed envelope with an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Health check envelope
    pub fn health(service: impl Into<String>) -> Self {
        Self {
            ok: true,
            service: Some(service.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Echo the odds inputs back to the caller
    pub fn with_echo(
        mut self,
        sport: impl Into<String>,
        region: impl Into<String>,
        markets: impl Into<String>,
    ) -> Self {
        self.sport = Some(sport.into());
        self.region = Some(region.into());
        self.markets = Some(markets.into());
        self
    }
}
