//! Shared HTTP request pipeline.
//!
//! Every resource service goes through [`ApiClient`], which attaches the
//! JSON content type, the bearer token and the `x-tenant-id` header, and
//! turns non-2xx responses into [`ClientError::Http`] with the most useful
//! message the body offers.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use swimdesk_config::ApiConfig;
use swimdesk_core::envelope::error_message;
use swimdesk_core::{ClientError, Language, MessageKey};

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Token and tenant captured from the session and tenant stores for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAuth {
    pub token: Option<String>,
    pub tenant_id: Option<String>,
}

/// Borrowed credentials that passed [`RequestAuth::require`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub token: &'a str,
    pub tenant_id: Option<&'a str>,
}

impl RequestAuth {
    pub fn new(token: Option<String>, tenant_id: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            tenant_id: tenant_id.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn has_tenant(&self) -> bool {
        self.tenant_id.is_some()
    }

    /// Token and tenant, both required.
    ///
    /// # Errors
    ///
    /// [`ClientError::AuthRequired`] naming whichever is missing, token first.
    pub fn require(&self, language: Language) -> Result<Credentials<'_>, ClientError> {
        let token = self.require_token(language)?.token;
        let tenant_id = self
            .tenant_id
            .as_deref()
            .ok_or_else(|| ClientError::missing_tenant(language))?;
        Ok(Credentials {
            token,
            tenant_id: Some(tenant_id),
        })
    }

    /// Token only, for calls that are not tenant-scoped.
    pub fn require_token(&self, language: Language) -> Result<Credentials<'_>, ClientError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::missing_token(language))?;
        Ok(Credentials {
            token,
            tenant_id: self.tenant_id.as_deref(),
        })
    }
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    language: Language,
    avatar_placeholder_url: String,
}

impl ApiClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("swimdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                warn!(error = %e, "Failed to build HTTP client");
                ClientError::transport(config.language)
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language,
            avatar_placeholder_url: config.avatar_placeholder_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn avatar_placeholder_url(&self) -> &str {
        &self.avatar_placeholder_url
    }

    /// `<collection>/<id>` with `id` percent-encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] for a blank id or a `.`/`..` segment.
    pub fn item_path(&self, collection: &str, id: &str) -> Result<String, ClientError> {
        let id = id.trim();
        if id.is_empty() || id == "." || id == ".." {
            return Err(ClientError::invalid_id(self.language));
        }
        Ok(format!("{collection}/{}", urlencoding::encode(id)))
    }

    pub async fn get(
        &self,
        path: &str,
        credentials: Option<Credentials<'_>>,
        query: &[(&str, String)],
    ) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, path, credentials).query(query);
        self.send(Method::GET, path, request).await
    }

    pub async fn post<B>(
        &self,
        path: &str,
        credentials: Option<Credentials<'_>>,
        body: &B,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path, credentials).json(body);
        self.send(Method::POST, path, request).await
    }

    pub async fn put<B>(
        &self,
        path: &str,
        credentials: Option<Credentials<'_>>,
        body: &B,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path, credentials).json(body);
        self.send(Method::PUT, path, request).await
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        credentials: Option<Credentials<'_>>,
    ) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self
            .http
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(credentials) = credentials {
            request = request.bearer_auth(credentials.token);
            if let Some(tenant_id) = credentials.tenant_id {
                request = request.header(TENANT_HEADER, tenant_id);
            }
        }

        request
    }

    #[instrument(skip(self, request), fields(http.method = %method, http.path = %path))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Value, ClientError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response");
            ClientError::transport(self.language)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(error = %e, status = status.as_u16(), "Failed to read response body");
            ClientError::transport(self.language)
        })?;

        if !status.is_success() {
            let message = self.failure_message(status, &body);
            warn!(status = status.as_u16(), message = %message, "Request rejected");
            return Err(ClientError::http(status.as_u16(), message));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Request completed");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Response body is not JSON");
            ClientError::decode(self.language)
        })
    }

    /// JSON `message`/`error`, else the raw text, else a localized fallback.
    fn failure_message(&self, status: StatusCode, body: &str) -> String {
        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(message) = error_message(&json)
        {
            return message;
        }

        let text = body.trim();
        if !text.is_empty() && !text.starts_with('{') {
            return text.to_string();
        }

        debug!(status = status.as_u16(), "Error body carried no message");
        self.language.text(MessageKey::RequestFailed).to_string()
    }
}
