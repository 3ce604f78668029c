//! Unverified JWT payload inspection.
//!
//! Signatures are not checked here; the backend rejects forged tokens. The
//! client decodes the payload only to avoid sending requests with a token
//! that is known to be expired or issued before a breaking release.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::debug;

use swimdesk_config::SessionConfig;

use crate::claims::TokenClaims;

/// Validity rules applied to a decoded token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    /// Tokens with `iat` earlier than this are stale.
    pub min_issued_at: DateTime<Utc>,
}

impl From<&SessionConfig> for TokenPolicy {
    fn from(config: &SessionConfig) -> Self {
        Self {
            min_issued_at: config.min_issued_at,
        }
    }
}

/// Outcome of inspecting a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Missing,
    Malformed,
    Expired,
    /// Issued before the app-version cutoff.
    Stale,
    Valid(TokenClaims),
}

impl TokenStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid(_))
    }
}

/// Decodes the payload of `token` without verifying its signature.
///
/// # Errors
///
/// Returns an error when the token is not three base64url segments or the
/// payload is not a JSON object.
pub fn decode_unverified(token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation).map(|data| data.claims)
}

/// Classifies `token` against `policy` at instant `now`.
///
/// Never fails: any decode problem is reported as [`TokenStatus::Malformed`].
pub fn token_status(token: Option<&str>, policy: &TokenPolicy, now: DateTime<Utc>) -> TokenStatus {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return TokenStatus::Missing;
    };

    let claims = match decode_unverified(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Token payload could not be decoded");
            return TokenStatus::Malformed;
        }
    };

    let (Some(exp), Some(iat)) = (claims.exp, claims.iat) else {
        debug!("Token payload lacks exp or iat");
        return TokenStatus::Malformed;
    };

    if exp <= now.timestamp() {
        return TokenStatus::Expired;
    }

    if iat < policy.min_issued_at.timestamp() {
        return TokenStatus::Stale;
    }

    TokenStatus::Valid(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn policy() -> TokenPolicy {
        TokenPolicy {
            min_issued_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn mint(payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let token = mint(json!({
            "sub": "user-1",
            "exp": (now() + Duration::hours(1)).timestamp(),
            "iat": (now() - Duration::minutes(5)).timestamp(),
        }));

        let status = token_status(Some(&token), &policy(), now());
        match status {
            TokenStatus::Valid(claims) => assert_eq!(claims.sub.as_deref(), Some("user-1")),
            other => panic!("expected valid token, got {other:?}"),
        }
    }

    #[test]
    fn test_expired_token() {
        let token = mint(json!({
            "exp": (now() - Duration::seconds(1)).timestamp(),
            "iat": (now() - Duration::hours(2)).timestamp(),
        }));
        assert_eq!(token_status(Some(&token), &policy(), now()), TokenStatus::Expired);
    }

    #[test]
    fn test_token_issued_before_cutoff_is_stale() {
        let token = mint(json!({
            "exp": (now() + Duration::days(365)).timestamp(),
            "iat": Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap().timestamp(),
        }));
        assert_eq!(token_status(Some(&token), &policy(), now()), TokenStatus::Stale);
    }

    #[test]
    fn test_missing_claims_are_malformed() {
        let no_exp = mint(json!({ "iat": now().timestamp() }));
        let no_iat = mint(json!({ "exp": (now() + Duration::hours(1)).timestamp() }));
        assert_eq!(token_status(Some(&no_exp), &policy(), now()), TokenStatus::Malformed);
        assert_eq!(token_status(Some(&no_iat), &policy(), now()), TokenStatus::Malformed);
    }

    #[test]
    fn test_garbage_tokens() {
        for token in ["", "   ", "abc", "a.b.c", "invalid.token.here"] {
            let status = token_status(Some(token), &policy(), now());
            assert!(!status.is_valid(), "{token:?} should not be valid");
        }
        assert_eq!(token_status(None, &policy(), now()), TokenStatus::Missing);
    }

    #[test]
    fn test_signature_is_not_checked() {
        let token = mint(json!({
            "exp": (now() + Duration::hours(1)).timestamp(),
            "iat": now().timestamp(),
        }));
        let (head, _) = token.rsplit_once('.').unwrap();
        let forged = format!("{head}.AAAA");
        assert!(token_status(Some(&forged), &policy(), now()).is_valid());
    }
}
