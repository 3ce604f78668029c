//! Manager user endpoints.
//!
//! Students and instructors are both users distinguished by `role_front`;
//! the student and instructor services are thin role-bound wrappers over
//! these calls.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use swimdesk_core::{ClientError, ListQuery, Page, Shape, unwrap_one, unwrap_page};
use swimdesk_models::UserProfile;

use crate::client::{ApiClient, RequestAuth};

pub const USERS_PATH: &str = "/v1/workflow-process/manager/users";
pub const USER_PATH: &str = "/v1/workflow-process/manager/user";

pub struct UserService;

impl UserService {
    /// Paged users with the given front role.
    ///
    /// Without a selected tenant there is nothing to list, so an empty page
    /// is returned without touching the network.
    #[instrument(skip(api, auth, query))]
    pub async fn list_by_role<T>(
        api: &ApiClient,
        auth: &RequestAuth,
        role: &str,
        query: &ListQuery,
    ) -> Result<Page<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        if !auth.has_tenant() {
            debug!("No tenant selected, returning empty page");
            return Ok(Page::default());
        }
        let credentials = auth.require(api.language())?;

        let mut params = vec![("role", role.to_string())];
        params.extend(query.to_pairs());

        let body = api.get(USERS_PATH, Some(credentials), &params).await?;
        Ok(unwrap_page(&body))
    }

    #[instrument(skip(api, auth))]
    pub async fn get_by_id<T>(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
    ) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(&api.item_path(USER_PATH, id)?, Some(credentials), &[])
            .await?;
        Ok(unwrap_one(&body, Shape::NestedDetail))
    }

    /// Profile lookup used when enriching conversations.
    pub async fn get_user(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
    ) -> Result<Option<UserProfile>, ClientError> {
        Self::get_by_id(api, auth, id).await
    }

    /// Creates a user, tagging the body with `role_front: [role]`.
    #[instrument(skip(api, auth, dto))]
    pub async fn create_with_role<T, D>(
        api: &ApiClient,
        auth: &RequestAuth,
        role: &str,
        dto: &D,
    ) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned,
        D: Serialize,
    {
        let credentials = auth.require(api.language())?;
        let body = with_role_front(dto, role).map_err(|_| ClientError::decode(api.language()))?;
        let response = api.post(USER_PATH, Some(credentials), &body).await?;
        Ok(unwrap_one(&response, Shape::NestedDetail))
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn update_by_id<T, D>(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
        dto: &D,
    ) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned,
        D: Serialize,
    {
        let credentials = auth.require(api.language())?;
        let response = api
            .put(&api.item_path(USER_PATH, id)?, Some(credentials), dto)
            .await?;
        Ok(unwrap_one(&response, Shape::NestedDetail))
    }
}

fn with_role_front<D: Serialize>(dto: &D, role: &str) -> Result<Value, serde_json::Error> {
    let mut body = serde_json::to_value(dto)?;
    if let Value::Object(map) = &mut body {
        map.insert("role_front".to_string(), json!([role]));
    }
    Ok(body)
}
