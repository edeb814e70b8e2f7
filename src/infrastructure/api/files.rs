//! Files API.

use serde_json::Value;

use super::{decode, SharedTransport};
use crate::domain::entities::{FileMeta, UploadFile};
use crate::infrastructure::http::ApiRequest;
use crate::shared::error::ClientError;

/// Multipart field name expected by the upload endpoint.
pub const UPLOAD_FIELD: &str = "files";

/// Wrapper over the `/files` resource.
#[derive(Clone)]
pub struct FilesApi {
    transport: SharedTransport,
}

impl FilesApi {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// Files attached to a post. Anything other than an array yields an empty list.
    pub async fn by_post(&self, post_id: i64) -> Result<Vec<FileMeta>, ClientError> {
        let value = self
            .transport
            .send(ApiRequest::get(format!("/files/post/{}", post_id)))
            .await?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        decode(value)
    }

    pub async fn upload(&self, post_id: i64, files: Vec<UploadFile>) -> Result<Value, ClientError> {
        self.transport
            .send(ApiRequest::post(format!("/files/upload/{}", post_id)).multipart(UPLOAD_FIELD, files))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.transport.send(ApiRequest::delete(format!("/files/{}", id))).await?;
        Ok(())
    }

    /// Absolute download URL; no request is made.
    pub fn download_url(&self, stored_name: &str) -> String {
        self.transport.url_for(&format!("/files/download/{}", stored_name))
    }
}
