//! Conversations and chat history.

use futures_util::future::join_all;
use tracing::{instrument, warn};

use swimdesk_core::{ClientError, ListQuery, Page, unwrap_page};
use swimdesk_models::{ChatMessage, Conversation, ConversationWithUsers, UserProfile};

use crate::client::{ApiClient, RequestAuth};
use crate::modules::users::UserService;

pub const CONVERSATIONS_PATH: &str = "/v1/workflow-process/messages";
pub const MESSAGES_PATH: &str = "/v1/workflow-process/message";

pub struct MessageService;

impl MessageService {
    #[instrument(skip(api, auth))]
    pub async fn list_conversations(
        api: &ApiClient,
        auth: &RequestAuth,
        query: &ListQuery,
    ) -> Result<Page<Conversation>, ClientError> {
        let credentials = auth.require(api.language())?;
        let body = api
            .get(CONVERSATIONS_PATH, Some(credentials), &query.to_pairs())
            .await?;
        Ok(unwrap_page(&body))
    }

    #[instrument(skip(api, auth))]
    pub async fn list_messages(
        api: &ApiClient,
        auth: &RequestAuth,
        conversation_id: &str,
        query: &ListQuery,
    ) -> Result<Page<ChatMessage>, ClientError> {
        let credentials = auth.require(api.language())?;
        let mut params = vec![("conversation_id", conversation_id.to_string())];
        params.extend(query.to_pairs());

        let body = api.get(MESSAGES_PATH, Some(credentials), &params).await?;
        Ok(unwrap_page(&body))
    }

    /// Conversations with each participant's profile attached.
    ///
    /// Profiles are fetched concurrently. A failed or empty lookup drops that
    /// participant only; conversation and participant order are kept.
    #[instrument(skip(api, auth))]
    pub async fn conversations_with_user_details(
        api: &ApiClient,
        auth: &RequestAuth,
        query: &ListQuery,
    ) -> Result<Page<ConversationWithUsers>, ClientError> {
        let page = Self::list_conversations(api, auth, query).await?;

        let enriched = join_all(
            page.items
                .into_iter()
                .map(|conversation| attach_users(api, auth, conversation)),
        )
        .await;

        Ok(Page {
            items: enriched,
            meta: page.meta,
        })
    }
}

async fn attach_users(
    api: &ApiClient,
    auth: &RequestAuth,
    conversation: Conversation,
) -> ConversationWithUsers {
    let lookups = conversation
        .participants
        .iter()
        .map(|user_id| UserService::get_user(api, auth, user_id));

    let user_details: Vec<UserProfile> = join_all(lookups)
        .await
        .into_iter()
        .zip(&conversation.participants)
        .filter_map(|(result, user_id)| match result {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                warn!(conversation.id = %conversation.id, user.id = %user_id, "Participant profile missing from response");
                None
            }
            Err(e) => {
                warn!(conversation.id = %conversation.id, user.id = %user_id, error = %e, "Failed to fetch participant profile");
                None
            }
        })
        .collect();

    ConversationWithUsers {
        conversation,
        user_details,
    }
}
