//! Data model unit tests

use odds_gpt_backend::models::query::{is_valid_sport_key, ODDS_FORMAT};
use odds_gpt_backend::models::{Envelope, OddsQuery, QueryParams, SportsQuery};
use odds_gpt_backend::AppError;
use serde_json::json;

fn query(pairs: &[(&str, &str)]) -> QueryParams {
    QueryParams::new(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn test_success_envelope_serialization() {
    let envelope = Envelope::success(json!([{"key": "a"}, {"key": "b"}]));

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"ok": true, "count": 2, "data": [{"key": "a"}, {"key": "b"}]})
    );
}

#[test]
fn test_odds_envelope_echoes_inputs() {
    let envelope = Envelope::success(json!([])).with_echo("soccer_epl", "uk", "h2h,totals");

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "ok": true,
            "sport": "soccer_epl",
            "region": "uk",
            "markets": "h2h,totals",
            "count": 0,
            "data": []
        })
    );
}

#[test]
fn test_scalar_payload_is_passed_through() {
    let envelope = Envelope::success(json!("plain string"));

    assert_eq!(envelope.count, None);
    assert_eq!(envelope.data, Some(json!("plain string")));
}

#[test]
fn test_envelope_round_trip() {
    let envelope = Envelope::failure("bad key").with_status(403);
    let text = serde_json::to_string(&envelope).unwrap();
    let parsed: Envelope = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, envelope);
}

#[test]
fn test_odds_query_from_params() {
    let odds = OddsQuery::from_params(&query(&[
        ("sport", "icehockey_nhl"),
        ("region", "eu"),
        ("markets", "h2h,spreads"),
        ("bookmakers", "pinnacle"),
        ("dateFormat", "unix"),
    ]))
    .unwrap();

    assert_eq!(odds.sport, "icehockey_nhl");
    assert_eq!(odds.region, "eu");
    assert_eq!(odds.markets, "h2h,spreads");
    assert_eq!(odds.bookmakers.as_deref(), Some("pinnacle"));
    assert_eq!(odds.date_format, "unix");
}

#[test]
fn test_odds_query_ignores_unknown_params() {
    let odds = OddsQuery::from_params(&query(&[("oddsFormat", "decimal")])).unwrap();

    assert_eq!(odds, OddsQuery::default());
    assert_eq!(ODDS_FORMAT, "american");
}

#[test]
fn test_repeated_params_use_first_value() {
    let odds = OddsQuery::from_params(&query(&[
        ("markets", "h2h"),
        ("markets", "spreads"),
    ]))
    .unwrap();

    assert_eq!(odds.markets, "h2h");
}

#[test]
fn test_sports_query_defaults() {
    assert_eq!(SportsQuery::from_params(&query(&[])), SportsQuery::default());
    assert_eq!(SportsQuery::default().all, "true");
}

#[test]
fn test_sport_key_validation() {
    for sport in ["upcoming", "soccer_epl", "americanfootball_ncaaf", "mma_mixed_martial_arts"] {
        assert!(is_valid_sport_key(sport), "expected valid: {}", sport);
    }

    for sport in ["..", "a/b", "a b", "nfl%2F", "odds?x=1", "#frag"] {
        assert!(!is_valid_sport_key(sport), "expected invalid: {}", sport);
        assert!(matches!(
            OddsQuery::from_params(&query(&[("sport", sport)])),
            Err(AppError::InvalidInput(_))
        ));
    }
}
