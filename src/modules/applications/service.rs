//! Course applications submitted by prospective students.

use tracing::{info, instrument};
use validator::Validate;

use swimdesk_core::{ClientError, ListQuery, Page, Shape, unwrap_one, unwrap_page};
use swimdesk_models::{Application, CreateApplicationDto, UpdateApplicationStatusDto};

use crate::client::{ApiClient, RequestAuth};

pub const APPLICATIONS_PATH: &str = "/v1/workflow-process/manager/applications";
pub const APPLICATION_PATH: &str = "/v1/workflow-process/manager/application";

pub struct ApplicationService;

impl ApplicationService {
    #[instrument(skip(api, auth))]
    pub async fn list_applications(
        api: &ApiClient,
        auth: &RequestAuth,
        query: &ListQuery,
    ) -> Result<Page<Application>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(APPLICATIONS_PATH, Some(credentials), &query.to_pairs())
            .await?;
        Ok(unwrap_page(&body))
    }

    #[instrument(skip(api, auth))]
    pub async fn get_application(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
    ) -> Result<Option<Application>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(&api.item_path(APPLICATION_PATH, id)?, Some(credentials), &[])
            .await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn create_application(
        api: &ApiClient,
        auth: &RequestAuth,
        dto: CreateApplicationDto,
    ) -> Result<Option<Application>, ClientError> {
        dto.validate()?;
        let credentials = auth.require(api.language())?;
        let body = api.post(APPLICATION_PATH, Some(credentials), &dto).await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }

    /// Approves, rejects or cancels an application.
    #[instrument(skip(api, auth, dto), fields(status = ?dto.status))]
    pub async fn update_application_status(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
        dto: UpdateApplicationStatusDto,
    ) -> Result<Option<Application>, ClientError> {
        dto.validate()?;
        let credentials = auth.require(api.language())?;
        let body = api
            .put(&api.item_path(APPLICATION_PATH, id)?, Some(credentials), &dto)
            .await?;
        info!(application.id = %id, "Application status updated");
        Ok(unwrap_one(&body, Shape::Detail))
    }
}
