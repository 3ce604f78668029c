//! Client error types.
//!
//! [`ClientError`] is returned by every API client function. Its `Display`
//! output is the caller-visible message, already in the display language.
//! Envelope shape mismatches and media lookup failures never become errors;
//! they degrade locally (see [`crate::envelope`]).

use crate::i18n::{Language, MessageKey};

/// Errors surfaced by API client functions.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Token or tenant missing before an authenticated call. Never reaches the network.
    #[error("{0}")]
    AuthRequired(String),

    /// Non-2xx response from the backend.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Request payload rejected before sending.
    #[error("{0}")]
    Validation(String),

    /// Connection-level failure (DNS, refused, timeout).
    #[error("{0}")]
    Transport(String),

    /// 2xx response whose body is not JSON.
    #[error("{0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    pub fn missing_token(language: Language) -> Self {
        Self::AuthRequired(language.text(MessageKey::MissingToken).to_string())
    }

    pub fn missing_tenant(language: Language) -> Self {
        Self::AuthRequired(language.text(MessageKey::MissingTenant).to_string())
    }

    pub fn invalid_id(language: Language) -> Self {
        Self::Validation(language.text(MessageKey::InvalidId).to_string())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn transport(language: Language) -> Self {
        Self::Transport(language.text(MessageKey::NetworkError).to_string())
    }

    pub fn decode(language: Language) -> Self {
        Self::Decode(language.text(MessageKey::InvalidResponse).to_string())
    }

    /// HTTP status for [`ClientError::Http`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the caller should send the user back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::AuthRequired(_)) || self.status() == Some(401)
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Error type for persisted client state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
