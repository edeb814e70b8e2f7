//! File attachment metadata and upload payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Resource;

/// Metadata of a file stored on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,

    /// Name the file was uploaded with
    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub original_name: String,

    /// Server-side name, used for downloads
    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub stored_name: String,

    /// Size in bytes
    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub file_size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, with = "crate::shared::datetime::optional", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for FileMeta {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Anything that can be checked by the upload validator.
pub trait UploadCandidate {
    fn file_name(&self) -> &str;
    fn size(&self) -> u64;
    fn mime_type(&self) -> &str;

    /// Lower-cased extension after the last dot.
    fn extension(&self) -> Option<String> {
        let name = self.file_name();
        name.rfind('.')
            .map(|idx| name[idx + 1..].to_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// A file selected for upload, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

impl UploadCandidate for UploadFile {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Name, size and type of a file without its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

impl UploadCandidate for FileDescriptor {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl From<&UploadFile> for FileDescriptor {
    fn from(file: &UploadFile) -> Self {
        Self::new(file.name.clone(), file.size(), file.mime_type.clone())
    }
}
