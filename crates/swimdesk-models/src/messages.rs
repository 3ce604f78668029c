//! Conversations and chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swimdesk_core::serde::deserialize_string_or_vec;
use validator::Validate;

use crate::common::AuditFields;
use crate::users::UserProfile;

/// A conversation between two or more users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Participant user ids
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub participants: Vec<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: Option<i64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

/// A conversation with the profiles of its participants.
///
/// `user_details` keeps participant order and omits participants whose
/// profile could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationWithUsers {
    #[serde(flatten)]
    pub conversation: Conversation,
    #[serde(rename = "userDetails", default)]
    pub user_details: Vec<UserProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub read_by: Vec<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

/// Payload of the `send_message` socket event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OutgoingMessage {
    #[validate(length(min = 1))]
    pub conversation_id: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

impl OutgoingMessage {
    pub fn new(conversation_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversation_with_users_serializes_user_details() {
        let conversation: Conversation = serde_json::from_value(json!({
            "_id": "c1",
            "participants": ["u1", "u2"],
            "unread_count": 3
        }))
        .unwrap();

        let with_users = ConversationWithUsers {
            conversation,
            user_details: Vec::new(),
        };
        let value = serde_json::to_value(&with_users).unwrap();
        assert_eq!(value["_id"], "c1");
        assert_eq!(value["userDetails"], json!([]));
    }

    #[test]
    fn test_outgoing_message_validation() {
        assert!(OutgoingMessage::new("c1", "hello").validate().is_ok());
        assert!(OutgoingMessage::new("c1", "").validate().is_err());
        assert!(OutgoingMessage::new("", "hello").validate().is_err());
    }
}
