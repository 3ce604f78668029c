//! Session store: the access token and the logged-in user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use swimdesk_auth::{SessionView, TokenPolicy, TokenStatus, token_status};
use swimdesk_core::StorageError;
use swimdesk_models::SessionUser;
use tracing::{debug, info, instrument, warn};

use crate::keys;
use crate::store::KeyValueStore;

/// Persisted authentication state.
///
/// Token and user are written and cleared together. Reads go through the
/// validity check: a token that is missing, undecodable, expired or stale
/// yields no token and no user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    policy: TokenPolicy,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, policy: TokenPolicy) -> Self {
        Self { storage, policy }
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Persists `token` and `user` in a single write.
    #[instrument(skip_all)]
    pub fn set_session(
        &self,
        token: &str,
        user: impl Into<SessionUser>,
    ) -> Result<(), StorageError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StorageError::InvalidValue {
                key: keys::session::TOKEN.to_string(),
                reason: "token is empty".to_string(),
            });
        }

        let user = user.into();
        let encoded = serde_json::to_string(&user)?;
        self.storage.set_many(&[
            (keys::session::TOKEN, token.to_string()),
            (keys::session::USER, encoded),
        ])?;

        info!(user.id = %user.id, user.role = %user.role, "Session stored");
        Ok(())
    }

    /// Classifies the stored token at the current time.
    pub fn token_status(&self) -> TokenStatus {
        self.token_status_at(Utc::now())
    }

    pub fn token_status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        match self.raw_token() {
            Ok(token) => token_status(token.as_deref(), &self.policy, now),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                TokenStatus::Missing
            }
        }
    }

    pub fn is_session_valid(&self) -> bool {
        self.is_session_valid_at(Utc::now())
    }

    pub fn is_session_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.token_status_at(now).is_valid()
    }

    /// The stored token, or `None` if the session is not valid.
    pub fn token(&self) -> Option<String> {
        self.token_at(Utc::now())
    }

    pub fn token_at(&self, now: DateTime<Utc>) -> Option<String> {
        if !self.is_session_valid_at(now) {
            return None;
        }
        self.raw_token().ok().flatten()
    }

    /// The stored user, or `None` if the session is not valid.
    pub fn user(&self) -> Option<SessionUser> {
        self.user_at(Utc::now())
    }

    pub fn user_at(&self, now: DateTime<Utc>) -> Option<SessionUser> {
        if !self.is_session_valid_at(now) {
            return None;
        }

        let raw = self.storage.get(keys::session::USER).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user is unreadable");
                None
            }
        }
    }

    /// What the route guard needs to know about the current session.
    pub fn view(&self) -> SessionView {
        self.view_at(Utc::now())
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> SessionView {
        match self.user_at(now) {
            Some(user) => SessionView::authenticated(user.role),
            None => SessionView::anonymous(),
        }
    }

    /// Removes token and user. The selected tenant is left alone.
    #[instrument(skip_all)]
    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.storage
            .remove_many(&[keys::session::TOKEN, keys::session::USER])?;
        debug!("Session cleared");
        Ok(())
    }

    fn raw_token(&self) -> Result<Option<String>, StorageError> {
        self.storage.get(keys::session::TOKEN)
    }
}
