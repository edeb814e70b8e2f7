//! Posts API.

use serde_json::Value;

use super::{decode, SharedTransport};
use crate::domain::entities::{Page, Post, PostDraft, PostPatch};
use crate::infrastructure::http::{ApiRequest, QueryParams};
use crate::shared::error::ClientError;

/// Wrapper over the `/posts` resource.
#[derive(Clone)]
pub struct PostsApi {
    transport: SharedTransport,
}

impl PostsApi {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// List posts. `query` carries `page`, `size` and optional filters.
    pub async fn list(&self, query: QueryParams) -> Result<Page<Post>, ClientError> {
        let value = self.transport.send(ApiRequest::get("/posts").query(query)).await?;
        decode(value)
    }

    /// Raw detail payload for a post.
    pub async fn get(&self, id: i64) -> Result<Value, ClientError> {
        self.transport.send(ApiRequest::get(format!("/posts/{}", id))).await
    }

    pub async fn create(&self, draft: &PostDraft) -> Result<Value, ClientError> {
        self.transport.send(ApiRequest::post("/posts").json(draft)?).await
    }

    pub async fn update(&self, id: i64, patch: &PostPatch) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest::put(format!("/posts/{}", id)).json(patch)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.transport.send(ApiRequest::delete(format!("/posts/{}", id))).await?;
        Ok(())
    }

    pub async fn search(&self, query: QueryParams) -> Result<Page<Post>, ClientError> {
        let value = self
            .transport
            .send(ApiRequest::get("/posts/search").query(query))
            .await?;
        decode(value)
    }
}
