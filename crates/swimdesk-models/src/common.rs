//! Fields shared by every backend entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swimdesk_core::serde::deserialize_optional_string;

/// Tenant and audit fields present on every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Reference to an uploaded file.
///
/// The backend sends either a bare media id or an object with `_id`, `url`
/// and/or `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MediaRefRepr")]
pub struct MediaRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl MediaRef {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// A URL usable without a lookup, if the reference carries one.
    pub fn direct_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MediaRefRepr {
    Id(String),
    Object {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        path: Option<String>,
    },
}

impl From<MediaRefRepr> for MediaRef {
    fn from(repr: MediaRefRepr) -> Self {
        match repr {
            MediaRefRepr::Id(id) => MediaRef::from_id(id),
            MediaRefRepr::Object { id, url, path } => MediaRef { id, url, path },
        }
    }
}
