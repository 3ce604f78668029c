//! Session-aware navigation on top of the pure [`RouteGuard`].

use std::time::Duration;

use swimdesk_auth::{GuardDecision, RouteGuard, TokenStatus};
use swimdesk_session::SessionStore;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub decision: GuardDecision,
    /// Redirect target, `None` when the navigation is allowed.
    pub location: Option<String>,
}

impl Navigation {
    pub fn is_allowed(&self) -> bool {
        self.decision == GuardDecision::Allow
    }
}

/// Runs the route guard against the stored session.
///
/// A stored token that is expired, stale or undecodable is cleared before
/// the decision is made, so the user lands on the login page with a clean
/// slate.
#[derive(Debug, Clone)]
pub struct Navigator {
    guard: RouteGuard,
    sessions: SessionStore,
}

impl Navigator {
    pub fn new(sessions: SessionStore) -> Self {
        Self::with_guard(RouteGuard::default(), sessions)
    }

    pub fn with_guard(guard: RouteGuard, sessions: SessionStore) -> Self {
        Self { guard, sessions }
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        clear_if_invalid(&self.sessions);

        let decision = self.guard.evaluate(path, &self.sessions.view());
        let location = self.guard.location(&decision);
        Navigation { decision, location }
    }
}

/// Clears a stored but unusable session. Returns true if one was cleared.
fn clear_if_invalid(sessions: &SessionStore) -> bool {
    match sessions.token_status() {
        TokenStatus::Missing | TokenStatus::Valid(_) => false,
        status => {
            info!(?status, "Clearing invalid session");
            if let Err(e) = sessions.clear_session() {
                warn!(error = %e, "Failed to clear invalid session");
            }
            true
        }
    }
}

/// Periodic session re-check.
#[derive(Debug, Clone)]
pub struct SessionWatch {
    sessions: SessionStore,
    interval: Duration,
}

impl SessionWatch {
    pub fn new(sessions: SessionStore, interval: Duration) -> Self {
        Self {
            sessions,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// Starts the watcher on the current runtime.
    ///
    /// The handle's [`SessionWatchHandle::expired`] resolves once a stored
    /// session has gone invalid and been cleared. The task stops then, or
    /// when the handle is dropped.
    pub fn spawn(self) -> SessionWatchHandle {
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                if clear_if_invalid(&self.sessions) {
                    warn!("Session expired");
                    let _ = tx.send(true);
                    return;
                }
            }
        });

        SessionWatchHandle { expired: rx, task }
    }
}

pub struct SessionWatchHandle {
    expired: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl SessionWatchHandle {
    /// Resolves when the session expires. Returns false if the watcher stopped first.
    pub async fn expired(&mut self) -> bool {
        self.expired.wait_for(|expired| *expired).await.is_ok()
    }
}

impl Drop for SessionWatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;
    use swimdesk_auth::{Role, TokenPolicy};
    use swimdesk_models::UserProfile;
    use swimdesk_session::MemoryStore;

    fn sessions() -> SessionStore {
        SessionStore::new(
            Arc::new(MemoryStore::new()),
            TokenPolicy {
                min_issued_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
        )
    }

    fn token(exp_offset: ChronoDuration) -> String {
        let now = Utc::now();
        encode(
            &Header::default(),
            &json!({ "sub": "u1", "iat": now.timestamp() - 60, "exp": (now + exp_offset).timestamp() }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn profile(role: &str) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            role_front: vec![role.into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_expired_session_is_cleared_and_redirected() {
        let sessions = sessions();
        sessions
            .set_session(&token(ChronoDuration::seconds(-30)), profile("manager"))
            .unwrap();

        let navigation = Navigator::new(sessions.clone()).navigate("/manager/students");
        assert_eq!(
            navigation.location.as_deref(),
            Some("/login?redirect=%2Fmanager%2Fstudents")
        );
        assert_eq!(sessions.token_status(), TokenStatus::Missing);
    }

    #[test]
    fn test_role_mismatch_goes_home() {
        let sessions = sessions();
        sessions
            .set_session(&token(ChronoDuration::hours(1)), profile("student"))
            .unwrap();
        let navigator = Navigator::new(sessions);

        let navigation = navigator.navigate("/manager");
        assert_eq!(navigation.decision, GuardDecision::RedirectHome);
        assert_eq!(navigation.location.as_deref(), Some("/"));

        assert!(navigator.navigate("/student/courses").is_allowed());
        assert_eq!(
            navigator.navigate("/login").decision,
            GuardDecision::RedirectToRoleHome(Role::Student)
        );
    }

    #[tokio::test]
    async fn test_watch_signals_expiry() {
        let sessions = sessions();
        sessions
            .set_session(&token(ChronoDuration::seconds(-1)), profile("manager"))
            .unwrap();

        let mut handle = SessionWatch::new(sessions.clone(), Duration::from_millis(10)).spawn();
        let expired = tokio::time::timeout(Duration::from_secs(2), handle.expired())
            .await
            .unwrap();
        assert!(expired);
        assert_eq!(sessions.token_status(), TokenStatus::Missing);
    }

    #[tokio::test]
    async fn test_watch_ignores_missing_session() {
        let mut handle = SessionWatch::new(sessions(), Duration::from_millis(5)).spawn();
        let result = tokio::time::timeout(Duration::from_millis(50), handle.expired()).await;
        assert!(result.is_err());
    }
}
