//! Comments API.

use serde_json::{json, Value};

use super::{decode, SharedTransport};
use crate::domain::entities::{Comment, CommentDraft};
use crate::infrastructure::http::ApiRequest;
use crate::shared::error::ClientError;

/// Wrapper over the `/comments` resource.
#[derive(Clone)]
pub struct CommentsApi {
    transport: SharedTransport,
}

impl CommentsApi {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    pub async fn by_post(&self, post_id: i64) -> Result<Vec<Comment>, ClientError> {
        let value = self
            .transport
            .send(ApiRequest::get(format!("/comments/post/{}", post_id)))
            .await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        decode(value)
    }

    pub async fn create(&self, draft: &CommentDraft) -> Result<Value, ClientError> {
        self.transport.send(ApiRequest::post("/comments").json(draft)?).await
    }

    pub async fn update(&self, id: i64, content: &str) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest::put(format!("/comments/{}", id)).json(&json!({ "content": content }))?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.transport.send(ApiRequest::delete(format!("/comments/{}", id))).await?;
        Ok(())
    }
}
