use std::sync::Arc;

use tracing::{info, instrument};

use swimdesk_auth::TokenPolicy;
use swimdesk_config::ClientConfig;
use swimdesk_core::ClientError;
use swimdesk_models::SessionUser;
use swimdesk_session::{FileStore, KeyValueStore, SessionStore, TenantContext};

use crate::client::{ApiClient, RequestAuth};
use crate::middleware::{Navigator, SessionWatch};
use crate::modules::AuthService;
use crate::realtime::NotificationClient;

/// Everything a front end needs, wired from one configuration.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub tenants: TenantContext,
}

impl AppContext {
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config.api)?;
        let sessions = SessionStore::new(storage.clone(), TokenPolicy::from(&config.session));
        let tenants = TenantContext::new(storage);

        Ok(Self {
            config,
            api,
            sessions,
            tenants,
        })
    }

    /// Context persisting to the configured state file.
    pub fn open(config: ClientConfig) -> Result<Self, ClientError> {
        let storage = Arc::new(FileStore::open(&config.session.state_file)?);
        Self::new(config, storage)
    }

    /// Current token and tenant for the next request.
    pub fn auth(&self) -> RequestAuth {
        RequestAuth::new(self.sessions.token(), self.tenants.tenant())
    }

    /// Logs in and stores the session.
    ///
    /// If no tenant is selected yet and the user belongs to one, that tenant
    /// is selected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        let response = AuthService::login(&self.api, email, password).await?;
        let user = SessionUser::from_profile(response.user);

        self.sessions.set_session(&response.access_token, user.clone())?;

        if self.tenants.tenant().is_none()
            && let Some(tenant_id) = user
                .tenant_id
                .as_deref()
                .filter(|t| !t.trim().is_empty())
        {
            self.tenants.set_tenant(tenant_id)?;
        }

        info!(user.id = %user.id, user.role = %user.role, "Logged in");
        Ok(user)
    }

    /// Clears session and tenant.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.sessions.clear_session()?;
        self.tenants.clear_tenant()?;
        info!("Logged out");
        Ok(())
    }

    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.sessions.clone())
    }

    pub fn session_watch(&self) -> SessionWatch {
        SessionWatch::new(self.sessions.clone(), self.config.session.check_interval())
    }

    pub fn notification_client(&self) -> NotificationClient {
        NotificationClient::new(self.config.realtime.clone(), self.config.api.language)
    }
}
