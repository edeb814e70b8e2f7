//! Comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::Resource;

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,

    /// Post this comment belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub content: String,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub author: String,

    #[serde(default, with = "crate::shared::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, with = "crate::shared::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Comment {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    #[validate(range(min = 1, message = "A valid post id is required"))]
    pub post_id: i64,

    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,

    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
}
