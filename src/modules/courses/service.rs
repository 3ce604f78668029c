use tracing::instrument;
use validator::Validate;

use swimdesk_core::{ClientError, ListQuery, Page, Shape, unwrap_one, unwrap_page};
use swimdesk_models::{Course, CreateCourseDto, UpdateCourseDto};

use crate::client::{ApiClient, RequestAuth};

pub const COURSES_PATH: &str = "/v1/workflow-process/manager/courses";
pub const COURSE_PATH: &str = "/v1/workflow-process/manager/course";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(api, auth))]
    pub async fn list_courses(
        api: &ApiClient,
        auth: &RequestAuth,
        query: &ListQuery,
    ) -> Result<Page<Course>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(COURSES_PATH, Some(credentials), &query.to_pairs())
            .await?;
        Ok(unwrap_page(&body))
    }

    #[instrument(skip(api, auth))]
    pub async fn get_course(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
    ) -> Result<Option<Course>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(&api.item_path(COURSE_PATH, id)?, Some(credentials), &[])
            .await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn create_course(
        api: &ApiClient,
        auth: &RequestAuth,
        dto: CreateCourseDto,
    ) -> Result<Option<Course>, ClientError> {
        dto.validate()?;
        let credentials = auth.require(api.language())?;
        let body = api.post(COURSE_PATH, Some(credentials), &dto).await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn update_course(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
        dto: UpdateCourseDto,
    ) -> Result<Option<Course>, ClientError> {
        dto.validate()?;
        let credentials = auth.require(api.language())?;
        let body = api
            .put(&api.item_path(COURSE_PATH, id)?, Some(credentials), &dto)
            .await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }
}
