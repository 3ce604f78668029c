use tracing::instrument;
use validator::Validate;

use swimdesk_core::{ClientError, ListQuery, Page};
use swimdesk_models::{CreateStudentDto, Student, UpdateStudentDto};

use crate::client::{ApiClient, RequestAuth};
use crate::modules::users::UserService;

pub const STUDENT_ROLE: &str = "student";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(api, auth))]
    pub async fn list_students(
        api: &ApiClient,
        auth: &RequestAuth,
        query: &ListQuery,
    ) -> Result<Page<Student>, ClientError> {
        UserService::list_by_role(api, auth, STUDENT_ROLE, query).await
    }

    #[instrument(skip(api, auth))]
    pub async fn get_student(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
    ) -> Result<Option<Student>, ClientError> {
        UserService::get_by_id(api, auth, id).await
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn create_student(
        api: &ApiClient,
        auth: &RequestAuth,
        dto: CreateStudentDto,
    ) -> Result<Option<Student>, ClientError> {
        dto.validate()?;
        UserService::create_with_role(api, auth, STUDENT_ROLE, &dto).await
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn update_student(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
        dto: UpdateStudentDto,
    ) -> Result<Option<Student>, ClientError> {
        dto.validate()?;
        UserService::update_by_id(api, auth, id, &dto).await
    }
}
