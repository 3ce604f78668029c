//! User profiles, the normalized session user, and login DTOs.

use serde::{Deserialize, Serialize};
use swimdesk_auth::Role;
use swimdesk_core::serde::{deserialize_optional_string, deserialize_string_or_vec};
use validator::Validate;

use crate::common::{AuditFields, MediaRef};

/// A user as the backend returns it (login, user detail endpoints).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub role_front: Vec<String>,
    #[serde(default)]
    pub role_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Vec<MediaRef>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl UserProfile {
    /// `first last`, falling back to nickname, username, email, then id.
    pub fn display_name(&self) -> String {
        display_name(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            [self.nickname.as_deref(), self.username.as_deref(), self.email.as_deref()],
            &self.id,
        )
    }
}

/// The user held in the session, with its role normalized once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub role_front: Vec<String>,
    pub role_system: Option<String>,
    pub role: Role,
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub avatar: Vec<MediaRef>,
}

impl SessionUser {
    pub fn from_profile(profile: UserProfile) -> Self {
        let role = Role::normalize(
            &profile.role_front,
            profile.role_system.as_deref(),
            profile.role.as_deref(),
        );

        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role_front: profile.role_front,
            role_system: profile.role_system,
            role,
            tenant_id: profile.audit.tenant_id,
            avatar: profile.avatar,
        }
    }

    pub fn display_name(&self) -> String {
        display_name(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            [None, self.username.as_deref(), self.email.as_deref()],
            &self.id,
        )
    }
}

impl From<UserProfile> for SessionUser {
    fn from(profile: UserProfile) -> Self {
        Self::from_profile(profile)
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// `data` of a successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken", alias = "access_token")]
    pub access_token: String,
    #[serde(default, rename = "refreshToken", alias = "refresh_token")]
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

pub(crate) fn display_name(
    first: Option<&str>,
    last: Option<&str>,
    fallbacks: [Option<&str>; 3],
    id: &str,
) -> String {
    let full = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if !full.is_empty() {
        return full;
    }

    fallbacks
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(id)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_from_backend_json() {
        let response: LoginResponse = serde_json::from_value(json!({
            "accessToken": "tok",
            "user": {
                "_id": "u1",
                "username": "somchai",
                "email": "somchai@example.com",
                "role_front": ["manager"],
                "role_system": "user",
                "tenant_id": "t1"
            }
        }))
        .unwrap();

        assert_eq!(response.access_token, "tok");
        let user = SessionUser::from_profile(response.user);
        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.tenant_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_role_front_as_plain_string() {
        let profile: UserProfile =
            serde_json::from_value(json!({ "_id": "u2", "role_front": "student" })).unwrap();
        assert_eq!(SessionUser::from(profile).role, Role::Student);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut profile = UserProfile {
            id: "u3".into(),
            ..UserProfile::default()
        };
        assert_eq!(profile.display_name(), "u3");

        profile.email = Some("a@b.c".into());
        assert_eq!(profile.display_name(), "a@b.c");

        profile.first_name = Some("Nok".into());
        profile.last_name = Some(" Srisuk ".into());
        assert_eq!(profile.display_name(), "Nok Srisuk");
    }

    #[test]
    fn test_login_request_validation() {
        let request = LoginRequest {
            email: String::new(),
            password: "x".into(),
        };
        assert!(request.validate().is_err());
    }
}
