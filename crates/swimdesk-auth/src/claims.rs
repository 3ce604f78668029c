//! JWT payload fields read by the client.

use serde::{Deserialize, Serialize};

/// Claims decoded from an access token payload.
///
/// Every field is optional so that a token missing `exp` or `iat` decodes
/// and is then rejected by [`crate::jwt::token_status`] rather than failing
/// deserialization with an opaque error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (subject claim)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// User's email address, when the backend embeds it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Token expiration timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Token issued-at timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}
