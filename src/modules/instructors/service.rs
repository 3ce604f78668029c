use tracing::instrument;
use validator::Validate;

use swimdesk_core::{ClientError, ListQuery, Page};
use swimdesk_models::{CreateInstructorDto, Instructor, UpdateInstructorDto};

use crate::client::{ApiClient, RequestAuth};
use crate::modules::users::UserService;

pub const INSTRUCTOR_ROLE: &str = "instructor";

pub struct InstructorService;

impl InstructorService {
    #[instrument(skip(api, auth))]
    pub async fn list_instructors(
        api: &ApiClient,
        auth: &RequestAuth,
        query: &ListQuery,
    ) -> Result<Page<Instructor>, ClientError> {
        UserService::list_by_role(api, auth, INSTRUCTOR_ROLE, query).await
    }

    #[instrument(skip(api, auth))]
    pub async fn get_instructor(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
    ) -> Result<Option<Instructor>, ClientError> {
        UserService::get_by_id(api, auth, id).await
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn create_instructor(
        api: &ApiClient,
        auth: &RequestAuth,
        dto: CreateInstructorDto,
    ) -> Result<Option<Instructor>, ClientError> {
        dto.validate()?;
        UserService::create_with_role(api, auth, INSTRUCTOR_ROLE, &dto).await
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn update_instructor(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
        dto: UpdateInstructorDto,
    ) -> Result<Option<Instructor>, ClientError> {
        dto.validate()?;
        UserService::update_by_id(api, auth, id, &dto).await
    }
}
