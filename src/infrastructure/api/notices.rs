//! Notices API.
//!
//! Public notice endpoints live under `/notices`; listing inactive notices
//! and bulk maintenance require the admin endpoints under `/admin/notices`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode, SharedTransport};
use crate::domain::entities::{Listing, NoticeDraft, NoticeStats, Page, Post, PostPatch};
use crate::infrastructure::http::{ApiRequest, QueryParams};
use crate::shared::error::ClientError;

/// Payload of the expired-notices endpoint.
#[derive(Debug, Default, Deserialize)]
struct ExpiredNotices {
    #[serde(default)]
    notices: Vec<Post>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchStatus<'a> {
    notice_ids: &'a [i64],
    is_active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchIds<'a> {
    notice_ids: &'a [i64],
}

/// Wrapper over the notice endpoints.
#[derive(Clone)]
pub struct NoticesApi {
    transport: SharedTransport,
}

impl NoticesApi {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// Active notices, paged.
    pub async fn list(&self, query: QueryParams) -> Result<Page<Post>, ClientError> {
        let value = self.transport.send(ApiRequest::get("/notices").query(query)).await?;
        decode(value)
    }

    /// All notices including inactive ones (admin).
    pub async fn admin_list(&self, query: QueryParams) -> Result<Page<Post>, ClientError> {
        let value = self
            .transport
            .send(ApiRequest::get("/admin/notices").query(query))
            .await?;
        decode(value)
    }

    pub async fn get(&self, id: i64) -> Result<Value, ClientError> {
        self.transport.send(ApiRequest::get(format!("/notices/{}", id))).await
    }

    pub async fn create(&self, draft: &NoticeDraft) -> Result<Value, ClientError> {
        self.transport.send(ApiRequest::post("/notices").json(draft)?).await
    }

    pub async fn update(&self, id: i64, patch: &PostPatch) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest::put(format!("/notices/{}", id)).json(patch)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.transport.send(ApiRequest::delete(format!("/notices/{}", id))).await?;
        Ok(())
    }

    /// Flip `isActive` on the server and return the updated notice.
    pub async fn toggle_status(&self, id: i64) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest::patch(format!("/notices/{}/toggle-status", id)))
            .await
    }

    /// Active notices. The server answers with a bare array or a page.
    pub async fn active(&self) -> Result<Vec<Post>, ClientError> {
        let listing: Listing<Post> = decode(self.transport.send(ApiRequest::get("/notices/active")).await?)?;
        Ok(listing.into_items())
    }

    pub async fn pinned(&self) -> Result<Vec<Post>, ClientError> {
        decode(self.transport.send(ApiRequest::get("/notices/pinned")).await?)
    }

    pub async fn regular(&self) -> Result<Vec<Post>, ClientError> {
        decode(self.transport.send(ApiRequest::get("/notices/regular")).await?)
    }

    pub async fn expired(&self) -> Result<Vec<Post>, ClientError> {
        let value = self.transport.send(ApiRequest::get("/admin/notices/expired")).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let payload: ExpiredNotices = decode(value)?;
        Ok(payload.notices)
    }

    pub async fn search(&self, query: QueryParams) -> Result<Page<Post>, ClientError> {
        let value = self
            .transport
            .send(ApiRequest::get("/notices/search").query(query))
            .await?;
        decode(value)
    }

    pub async fn stats(&self) -> Result<NoticeStats, ClientError> {
        decode(self.transport.send(ApiRequest::get("/notices/stats")).await?)
    }

    pub async fn batch_update_status(&self, ids: &[i64], is_active: bool) -> Result<Value, ClientError> {
        let body = BatchStatus {
            notice_ids: ids,
            is_active,
        };
        self.transport
            .send(ApiRequest::put("/admin/notices/batch-status").json(&body)?)
            .await
    }

    pub async fn batch_delete(&self, ids: &[i64]) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest::post("/admin/notices/batch-delete").json(&BatchIds { notice_ids: ids })?)
            .await
    }

    pub async fn cleanup_expired(&self) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest::post("/admin/notices/cleanup-expired"))
            .await
    }
}
