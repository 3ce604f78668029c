use tracing::instrument;
use validator::Validate;

use swimdesk_core::{ClientError, ListQuery, Page, Shape, unwrap_one, unwrap_page};
use swimdesk_models::{CreateNewsDto, NewsItem, UpdateNewsDto};

use crate::client::{ApiClient, RequestAuth};

pub const NEWS_LIST_PATH: &str = "/v1/workflow-process/manager/news";

pub struct NewsService;

impl NewsService {
    #[instrument(skip(api, auth))]
    pub async fn list_news(
        api: &ApiClient,
        auth: &RequestAuth,
        query: &ListQuery,
    ) -> Result<Page<NewsItem>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(NEWS_LIST_PATH, Some(credentials), &query.to_pairs())
            .await?;
        Ok(unwrap_page(&body))
    }

    #[instrument(skip(api, auth))]
    pub async fn get_news(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
    ) -> Result<Option<NewsItem>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(&api.item_path(NEWS_LIST_PATH, id)?, Some(credentials), &[])
            .await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn create_news(
        api: &ApiClient,
        auth: &RequestAuth,
        dto: CreateNewsDto,
    ) -> Result<Option<NewsItem>, ClientError> {
        dto.validate()?;
        let credentials = auth.require(api.language())?;
        let body = api.post(NEWS_LIST_PATH, Some(credentials), &dto).await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }

    #[instrument(skip(api, auth, dto))]
    pub async fn update_news(
        api: &ApiClient,
        auth: &RequestAuth,
        id: &str,
        dto: UpdateNewsDto,
    ) -> Result<Option<NewsItem>, ClientError> {
        dto.validate()?;
        let credentials = auth.require(api.language())?;
        let body = api
            .put(&api.item_path(NEWS_LIST_PATH, id)?, Some(credentials), &dto)
            .await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }
}
