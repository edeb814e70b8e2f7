//! Post entity.
//!
//! Notices are posts with `isNotice` set; they share the same record and
//! endpoints return them in the same shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::Resource;

/// A bulletin board post (or notice).
///
/// Fields mirror the server JSON (`camelCase`). Anything the client does not
/// model is kept in `extra` so that a round trip through the store is lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier
    pub id: i64,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub content: String,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub author: String,

    /// Whether this post is a notice
    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub is_notice: bool,

    /// Pinned notices are shown above regular ones
    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub is_pinned: bool,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub is_active: bool,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub view_count: i64,

    /// After this instant the notice is considered expired
    #[serde(default, with = "crate::shared::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,

    #[serde(default, with = "crate::shared::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, with = "crate::shared::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Unmodelled server fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Check if the notice has passed its expiry date at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.map(|expiry| expiry < now).unwrap_or(false)
    }

    /// Check if this post is an active, unexpired notice at `now`.
    pub fn is_live_notice_at(&self, now: DateTime<Utc>) -> bool {
        self.is_notice && self.is_active && !self.is_expired_at(now)
    }
}

impl Resource for Post {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            content: String::new(),
            author: String::new(),
            is_notice: false,
            is_pinned: false,
            is_active: false,
            view_count: 0,
            expiry_date: None,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }
}

/// Payload for creating a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
}

/// Partial update of a post or notice. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(
        default,
        with = "crate::shared::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl PostPatch {
    /// Patch that only changes the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Payload for creating a notice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoticeDraft {
    #[validate(length(min = 1, max = 200, message = "Title is required and must be at most 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content is required and must be at most 10000 characters"))]
    pub content: String,

    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,

    #[serde(default)]
    pub is_pinned: bool,

    #[serde(default)]
    pub is_active: bool,

    #[serde(
        default,
        with = "crate::shared::datetime::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Aggregate notice counters reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeStats {
    pub total: u64,
    pub active: u64,
    pub pinned: u64,
    pub expired: u64,
    pub expiring_soon: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let post: Post = serde_json::from_value(json!({
            "id": 3,
            "title": "hello",
            "isNotice": true,
            "category": "general"
        }))
        .unwrap();

        assert_eq!(post.id, 3);
        assert!(post.is_notice);
        assert!(!post.is_active);
        assert_eq!(post.extra.get("category"), Some(&json!("general")));
    }

    #[test]
    fn test_expiry_checks() {
        let now = Utc::now();
        let post = Post {
            is_notice: true,
            is_active: true,
            expiry_date: Some(now - Duration::hours(1)),
            ..Default::default()
        };
        assert!(post.is_expired_at(now));
        assert!(!post.is_live_notice_at(now));

        let open_ended = Post {
            expiry_date: None,
            ..post
        };
        assert!(open_ended.is_live_notice_at(now));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let body = serde_json::to_value(PostPatch::title("new")).unwrap();
        assert_eq!(body, json!({ "title": "new" }));
    }
}
