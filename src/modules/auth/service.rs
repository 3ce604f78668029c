use tracing::{info, instrument};
use validator::Validate;

use swimdesk_core::{ClientError, Shape, unwrap_one};
use swimdesk_models::{LoginRequest, LoginResponse, UserProfile};

use crate::client::{ApiClient, RequestAuth};

pub const LOGIN_PATH: &str = "/v1/auth/login";
pub const PROFILE_PATH: &str = "/v1/auth/profile";

pub struct AuthService;

impl AuthService {
    /// Exchanges credentials for an access token and the user's profile.
    ///
    /// Does not touch the session store; see `AppContext::login`.
    #[instrument(skip(api, password))]
    pub async fn login(
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let body = api.post(LOGIN_PATH, None, &request).await?;
        let response: LoginResponse =
            unwrap_one(&body, Shape::Flat).ok_or_else(|| ClientError::decode(api.language()))?;

        info!(user.id = %response.user.id, "Login succeeded");
        Ok(response)
    }

    #[instrument(skip(api, auth))]
    pub async fn profile(api: &ApiClient, auth: &RequestAuth) -> Result<UserProfile, ClientError> {
        let credentials = auth.require_token(api.language())?;
        let body = api.get(PROFILE_PATH, Some(credentials), &[]).await?;
        unwrap_one(&body, Shape::Flat).ok_or_else(|| ClientError::decode(api.language()))
    }
}
