//! API Wrappers
//!
//! One typed wrapper per REST resource, each sending requests through a
//! shared [`Transport`].
//!
//! ## Available Wrappers
//!
//! - **PostsApi** - `/posts`
//! - **NoticesApi** - `/notices` and the admin notice endpoints
//! - **CommentsApi** - `/comments`
//! - **FilesApi** - `/files`, multipart uploads and download URLs
//! - **UsersApi** - the user service (`/register`, `/login`, `/me`, ...)
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::infrastructure::api::PostsApi;
//!
//! let posts = PostsApi::new(board_transport.clone());
//! let page = posts.list(QueryParams::paging(0, 10)).await?;
//! ```
//!
//! Detail, create and update calls return the raw JSON payload; the stores
//! run it through the response normalizer.

mod comments;
mod files;
mod notices;
mod posts;
mod users;

pub use comments::CommentsApi;
pub use files::FilesApi;
pub use notices::NoticesApi;
pub use posts::PostsApi;
pub use users::UsersApi;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::infrastructure::http::Transport;
use crate::shared::error::ClientError;

/// Decode a response payload into `T`.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(ClientError::from)
}

/// Shared handle to a transport.
pub type SharedTransport = std::sync::Arc<dyn Transport>;
