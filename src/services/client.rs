//! HTTP client service
//!
//! Encapsulates HTTP communication with the upstream odds provider

use crate::config::settings::UpstreamConfig;
use crate::models::query::{OddsQuery, SportsQuery, ODDS_FORMAT};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::{redact_url, truncate_content};
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Decoded upstream body
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    /// Body parsed as JSON
    Json(Value),
    /// Body that is not JSON, kept verbatim for diagnostics
    Invalid(String),
}

impl UpstreamBody {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => UpstreamBody::Json(value),
            Err(_) => UpstreamBody::Invalid(text),
        }
    }
}

/// Odds provider API client
#[derive(Debug, Clone)]
pub struct OddsClient {
    client: Client,
    config: UpstreamConfig,
}

impl OddsClient {
    /// Create a new client instance
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("odds-gpt-backend/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// List the sports catalog
    pub async fn list_sports(&self, query: &SportsQuery) -> AppResult<Value> {
        let url = self.sports_url(query)?;
        self.fetch(url).await
    }

    /// Fetch odds for one sport
    pub async fn fetch_odds(&self, query: &OddsQuery) -> AppResult<Value> {
        let url = self.odds_url(query)?;
        self.fetch(url).await
    }

    /// Upstream URL of the sports catalog
    pub fn sports_url(&self, query: &SportsQuery) -> AppResult<Url> {
        let api_key = self.api_key()?;
        let mut url = self.endpoint(&["sports"])?;

        url.query_pairs_mut()
            .append_pair("apiKey", api_key)
            .append_pair("all", &query.all);

        Ok(url)
    }

    /// Upstream URL of the odds listing, `sport` pushed as one encoded segment
    pub fn odds_url(&self, query: &OddsQuery) -> AppResult<Url> {
        let api_key = self.api_key()?;
        let mut url = self.endpoint(&["sports", &query.sport, "odds"])?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("apiKey", api_key)
                .append_pair("regions", &query.region)
                .append_pair("markets", &query.markets)
                .append_pair("oddsFormat", ODDS_FORMAT)
                .append_pair("dateFormat", &query.date_format);
            if let Some(bookmakers) = &query.bookmakers {
                pairs.append_pair("bookmakers", bookmakers);
            }
        }

        Ok(url)
    }

    fn api_key(&self) -> AppResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or(AppError::MissingCredential)
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| AppError::Internal(format!("Invalid upstream base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Internal("Upstream base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Issue one GET and translate the outcome
    async fn fetch(&self, url: Url) -> AppResult<Value> {
        debug!("Sending upstream request: {}", redact_url(&url));

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(
                "Upstream request failed: {} - {}",
                status,
                truncate_content(&text, 200)
            );
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        match UpstreamBody::parse(text) {
            UpstreamBody::Json(value) => {
                debug!("Upstream request completed successfully");
                Ok(value)
            }
            UpstreamBody::Invalid(raw) => {
                warn!("Upstream returned invalid JSON: {}", truncate_content(&raw, 200));
                Err(AppError::InvalidUpstreamJson { raw })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config(api_key: Option<&str>) -> UpstreamConfig {
        UpstreamConfig {
            api_key: api_key.map(str::to_string),
            base_url: "https://api.the-odds-api.com/v4".to_string(),
            timeout: 5,
        }
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_client_creation() {
        assert!(OddsClient::new(create_test_config(Some("key"))).is_ok());
    }

    #[test]
    fn test_sports_url() {
        let client = OddsClient::new(create_test_config(Some("key"))).unwrap();
        let url = client.sports_url(&SportsQuery::default()).unwrap();

        assert_eq!(url.path(), "/v4/sports");
        assert_eq!(query_value(&url, "apiKey").as_deref(), Some("key"));
        assert_eq!(query_value(&url, "all").as_deref(), Some("true"));
    }

    #[test]
    fn test_odds_url_defaults() {
        let client = OddsClient::new(create_test_config(Some("key"))).unwrap();
        let url = client.odds_url(&OddsQuery::default()).unwrap();

        assert_eq!(url.path(), "/v4/sports/upcoming/odds");
        assert_eq!(query_value(&url, "regions").as_deref(), Some("us"));
        assert_eq!(query_value(&url, "markets").as_deref(), Some("h2h"));
        assert_eq!(query_value(&url, "oddsFormat").as_deref(), Some("american"));
        assert_eq!(query_value(&url, "dateFormat").as_deref(), Some("iso"));
        assert_eq!(query_value(&url, "bookmakers"), None);
    }

    #[test]
    fn test_odds_url_passes_bookmakers() {
        let client = OddsClient::new(create_test_config(Some("key"))).unwrap();
        let query = OddsQuery {
            sport: "basketball_nba".to_string(),
            bookmakers: Some("draftkings,fanduel".to_string()),
            ..Default::default()
        };
        let url = client.odds_url(&query).unwrap();

        assert_eq!(url.path(), "/v4/sports/basketball_nba/odds");
        assert_eq!(query_value(&url, "bookmakers").as_deref(), Some("draftkings,fanduel"));
    }

    #[test]
    fn test_sport_segment_is_encoded() {
        let client = OddsClient::new(create_test_config(Some("key"))).unwrap();
        let query = OddsQuery {
            sport: "a/b?c".to_string(),
            ..Default::default()
        };
        let url = client.odds_url(&query).unwrap();

        assert_eq!(url.path(), "/v4/sports/a%2Fb%3Fc/odds");
    }

    #[test]
    fn test_missing_credential() {
        let client = OddsClient::new(create_test_config(None)).unwrap();

        assert!(matches!(
            client.sports_url(&SportsQuery::default()),
            Err(AppError::MissingCredential)
        ));
        assert!(matches!(
            client.odds_url(&OddsQuery::default()),
            Err(AppError::MissingCredential)
        ));
    }

    #[test]
    fn test_upstream_body_parse() {
        assert_eq!(
            UpstreamBody::parse("[1,2]".to_string()),
            UpstreamBody::Json(serde_json::json!([1, 2]))
        );
        assert_eq!(
            UpstreamBody::parse("not-json".to_string()),
            UpstreamBody::Invalid("not-json".to_string())
        );
    }
}
