//! Inbound query parameters
//!
//! Normalizes raw query pairs into the typed inputs of the two proxy routes

use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ALL: &str = "true";
pub const DEFAULT_SPORT: &str = "upcoming";
pub const DEFAULT_REGION: &str = "us";
pub const DEFAULT_MARKETS: &str = "h2h";
pub const DEFAULT_DATE_FORMAT: &str = "iso";

/// Odds format sent upstream; callers cannot override it
pub const ODDS_FORMAT: &str = "american";

/// Raw query pairs in arrival order
///
/// A repeated key resolves to its first value and an empty value counts as absent.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`, `None` when missing or empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// Inputs of the sports catalog route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportsQuery {
    /// Include out-of-season sports
    pub all: String,
}

impl Default for SportsQuery {
    fn default() -> Self {
        Self {
            all: DEFAULT_ALL.to_string(),
        }
    }
}

impl SportsQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            all: params.get_or("all", DEFAULT_ALL).to_string(),
        }
    }
}

/// Inputs of the odds route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsQuery {
    pub sport: String,
    pub region: String,
    pub markets: String,
    /// Comma separated bookmaker keys, passed through as-is
    pub bookmakers: Option<String>,
    pub date_format: String,
}

impl Default for OddsQuery {
    fn default() -> Self {
        Self {
            sport: DEFAULT_SPORT.to_string(),
            region: DEFAULT_REGION.to_string(),
            markets: DEFAULT_MARKETS.to_string(),
            bookmakers: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl OddsQuery {
    /// Apply defaults and validate the sport key
    pub fn from_params(params: &QueryParams) -> AppResult<Self> {
        let sport = params.get_or("sport", DEFAULT_SPORT);
        if !is_valid_sport_key(sport) {
            return Err(AppError::InvalidInput("Invalid sport key".to_string()));
        }

        Ok(Self {
            sport: sport.to_string(),
            region: params.get_or("region", DEFAULT_REGION).to_string(),
            markets: params.get_or("markets", DEFAULT_MARKETS).to_string(),
            bookmakers: params.get("bookmakers").map(str::to_string),
            date_format: params.get_or("dateFormat", DEFAULT_DATE_FORMAT).to_string(),
        })
    }
}

/// Sport keys look like `upcoming` or `americanfootball_nfl`
pub fn is_valid_sport_key(sport: &str) -> bool {
    !sport.is_empty()
        && sport.len() <= 64
        && sport
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
