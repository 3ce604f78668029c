use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use swimdesk_auth::{TokenPolicy, TokenStatus, token_status};
use swimdesk_config::SessionConfig;

fn mint(payload: Value) -> String {
    encode(&Header::default(), &payload, &EncodingKey::from_secret(b"k")).unwrap()
}

fn policy_from(cutoff: Option<&str>) -> TokenPolicy {
    let cutoff = cutoff.map(str::to_string);
    let config = SessionConfig::from_lookup(&|key: &str| {
        (key == "SESSION_MIN_ISSUED_AT").then(|| cutoff.clone()).flatten()
    });
    TokenPolicy::from(&config)
}

#[test]
fn test_default_cutoff_rejects_tokens_from_before_2025() {
    let policy = policy_from(None);
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

    let old = mint(json!({
        "exp": (now + Duration::days(30)).timestamp(),
        "iat": Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap().timestamp(),
    }));
    let fresh = mint(json!({
        "exp": (now + Duration::days(30)).timestamp(),
        "iat": Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().timestamp(),
    }));

    assert_eq!(token_status(Some(&old), &policy, now), TokenStatus::Stale);
    assert!(token_status(Some(&fresh), &policy, now).is_valid());
}

#[test]
fn test_configured_cutoff_moves_the_boundary() {
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let token = mint(json!({
        "exp": (now + Duration::hours(1)).timestamp(),
        "iat": Utc.with_ymd_and_hms(2025, 5, 15, 8, 0, 0).unwrap().timestamp(),
    }));

    assert!(token_status(Some(&token), &policy_from(Some("2025-05-01")), now).is_valid());
    assert_eq!(
        token_status(Some(&token), &policy_from(Some("2025-06-01T00:00:00Z")), now),
        TokenStatus::Stale
    );
}

#[test]
fn test_unparseable_cutoff_falls_back_to_default() {
    assert_eq!(policy_from(Some("next tuesday")), policy_from(None));
}

#[test]
fn test_expiry_wins_over_staleness() {
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let token = mint(json!({
        "exp": (now - Duration::minutes(1)).timestamp(),
        "iat": Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().timestamp(),
    }));
    assert_eq!(token_status(Some(&token), &policy_from(None), now), TokenStatus::Expired);
}
