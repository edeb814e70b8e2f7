//! HTTP transport.
//!
//! [`Transport`] is the seam between the API wrappers and the network.
//! [`HttpTransport`] implements it over `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::credentials::Credentials;
use super::request::{ApiRequest, RequestBody};
use crate::domain::entities::UploadFile;
use crate::shared::error::ClientError;

/// Sends API requests and returns the decoded JSON body.
///
/// Non-success statuses are mapped with [`ClientError::from_status`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;

    /// Absolute URL of `path` on this service.
    fn url_for(&self, path: &str) -> String;
}

/// `reqwest`-backed transport for one REST service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<Credentials>,
}

impl HttpTransport {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        credentials: Arc<Credentials>,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn multipart_form(field: String, files: Vec<UploadFile>) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.data)
                .file_name(file.name)
                .mime_str(&file.mime_type)
                .map_err(|e| ClientError::Validation(format!("invalid MIME type: {}", e)))?;
            form = form.part(field.clone(), part);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = request;

        let mut builder = self.client.request(method.into(), self.url_for(&path));

        if let Some(token) = self.credentials.access_token() {
            builder = builder.bearer_auth(token);
        }
        if !query.is_empty() {
            builder = builder.query(&query.pairs());
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.json(&json),
            // reqwest sets the multipart boundary header itself
            RequestBody::Multipart { field, files } => builder.multipart(Self::multipart_form(field, files)?),
        };

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response was received");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let body = parse_body(&text);

        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return Ok(body);
        }

        let error = ClientError::from_status(status.as_u16(), &body);
        if error.is_auth() {
            warn!("Received 401, clearing session");
            self.credentials.invalidate();
        } else {
            warn!(status = status.as_u16(), error = %error, "Request rejected");
        }
        Err(error)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Empty bodies become `null`; bodies that are not JSON are kept as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
