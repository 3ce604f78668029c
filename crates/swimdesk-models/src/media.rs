//! Media lookups.

use serde::{Deserialize, Serialize};

use crate::common::AuditFields;

/// An uploaded file as returned by the media endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Media {
    /// Absolute URL for this file. Relative paths are joined onto `base_url`.
    pub fn resolve_url(&self, base_url: &str) -> Option<String> {
        let candidate = self
            .url
            .as_deref()
            .or(self.path.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())?;

        if candidate.starts_with("http://") || candidate.starts_with("https://") {
            Some(candidate.to_string())
        } else {
            Some(format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                candidate.trim_start_matches('/')
            ))
        }
    }
}
