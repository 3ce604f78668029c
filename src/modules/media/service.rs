//! Media lookups and avatar resolution.

use tracing::{debug, instrument};

use swimdesk_core::{ClientError, Shape, unwrap_one};
use swimdesk_models::{Media, MediaRef};

use crate::client::{ApiClient, RequestAuth};

pub const MEDIA_PATH: &str = "/v1/media";

pub struct MediaService;

impl MediaService {
    #[instrument(skip(api, auth))]
    pub async fn get_media(
        api: &ApiClient,
        auth: &RequestAuth,
        media_id: &str,
    ) -> Result<Option<Media>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(&api.item_path(MEDIA_PATH, media_id)?, Some(credentials), &[])
            .await?;
        Ok(unwrap_one(&body, Shape::Detail))
    }

    /// Display URL for the first reference in `refs`.
    ///
    /// A direct URL on the reference wins; otherwise the media record is
    /// looked up. Anything missing or failing yields the placeholder.
    #[instrument(skip(api, auth, refs), fields(refs = refs.len()))]
    pub async fn resolve_avatar(api: &ApiClient, auth: &RequestAuth, refs: &[MediaRef]) -> String {
        let placeholder = api.avatar_placeholder_url().to_string();

        let Some(first) = refs.first() else {
            return placeholder;
        };

        if let Some(url) = first.direct_url() {
            return url.to_string();
        }

        let Some(id) = first.id.as_deref().filter(|id| !id.trim().is_empty()) else {
            return placeholder;
        };

        match Self::get_media(api, auth, id).await {
            Ok(Some(media)) => media.resolve_url(api.base_url()).unwrap_or(placeholder),
            Ok(None) => {
                debug!(media.id = %id, "Media record not found");
                placeholder
            }
            Err(e) => {
                debug!(media.id = %id, error = %e, "Media lookup failed");
                placeholder
            }
        }
    }
}
