//! File Store
//!
//! Attachments of the post being edited or viewed: listing, multipart
//! upload, deletion and client-side checks before upload.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU8, Ordering};

use futures::future::try_join_all;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::resource_state::ResourceState;
use crate::domain::entities::{FileMeta, UploadCandidate, UploadFile};
use crate::domain::services::upload_rules::{file_kind, format_file_size, validate_file, validate_files};
use crate::domain::services::{BatchValidation, FileKind, FileRules};
use crate::domain::value_objects::ValidationResult;
use crate::infrastructure::api::FilesApi;
use crate::shared::error::ClientError;

/// Totals over the loaded files.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub total_files: usize,
    pub total_size: u64,
    pub total_size_formatted: String,
    pub type_stats: BTreeMap<FileKind, usize>,
}

/// Store for post attachments.
pub struct FileStore {
    api: FilesApi,
    rules: FileRules,
    state: RwLock<ResourceState<FileMeta>>,
    upload_progress: AtomicU8,
}

impl FileStore {
    pub fn new(api: FilesApi, rules: FileRules) -> Self {
        Self {
            api,
            rules,
            state: RwLock::new(ResourceState::default()),
            upload_progress: AtomicU8::new(0),
        }
    }

    /// Load the files of a post. A non-positive id is ignored.
    #[instrument(skip(self))]
    pub async fn fetch_files(&self, post_id: i64) {
        if post_id <= 0 {
            warn!("fetch_files called without a post id");
            return;
        }

        self.state.write().begin();

        let result = self.api.by_post(post_id).await;

        let mut state = self.state.write();
        match result {
            Ok(files) => {
                debug!(count = files.len(), "Files loaded");
                state.items = files;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load files");
                state.fail(&e);
                state.items.clear();
            }
        }
        state.finish();
    }

    /// Upload files as one multipart request, then reload the list.
    ///
    /// Progress is 0 while the request runs and 100 once it succeeded; it
    /// stays there until the next upload or [`FileStore::clear_files`].
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload_files(&self, post_id: i64, files: Vec<UploadFile>) -> Result<Value, ClientError> {
        if post_id <= 0 {
            return Err(ClientError::Validation("A post id is required.".into()));
        }
        if files.is_empty() {
            return Err(ClientError::Validation("No files to upload.".into()));
        }

        self.state.write().begin();
        self.upload_progress.store(0, Ordering::SeqCst);

        let result = self.api.upload(post_id, files).await;
        match &result {
            Ok(_) => {
                info!(post_id, "Files uploaded");
                self.fetch_files(post_id).await;
                self.upload_progress.store(100, Ordering::SeqCst);
            }
            Err(e) => {
                warn!(error = %e, "Upload failed");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    pub async fn upload_file(&self, post_id: i64, file: UploadFile) -> Result<Value, ClientError> {
        self.upload_files(post_id, vec![file]).await
    }

    /// Delete one file. With a `post_id` the list is reloaded afterwards.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, id: i64, post_id: Option<i64>) -> Result<(), ClientError> {
        self.state.write().begin();

        let result = self.api.delete(id).await;
        match &result {
            Ok(()) => {
                self.state.write().remove(id);
                if let Some(post_id) = post_id {
                    self.fetch_files(post_id).await;
                }
            }
            Err(e) => {
                warn!(file_id = id, error = %e, "Failed to delete file");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    /// Delete several files concurrently, one request each.
    ///
    /// The first failure rejects the batch. Requests already completed are
    /// not rolled back and the local list is left as it was.
    #[instrument(skip(self))]
    pub async fn delete_files(&self, ids: &[i64], post_id: Option<i64>) -> Result<(), ClientError> {
        if ids.is_empty() {
            return Err(ClientError::Validation("No files to delete.".into()));
        }

        self.state.write().begin();

        let result = try_join_all(ids.iter().map(|id| self.api.delete(*id)))
            .await
            .map(|_| ());
        match &result {
            Ok(()) => {
                {
                    let mut state = self.state.write();
                    for id in ids {
                        state.remove(*id);
                    }
                }
                if let Some(post_id) = post_id {
                    self.fetch_files(post_id).await;
                }
            }
            Err(e) => {
                warn!(error = %e, "Batch file delete failed");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    /// Download URL of a stored file, or `None` for an empty name.
    pub fn download_url(&self, stored_name: &str) -> Option<String> {
        if stored_name.is_empty() {
            warn!("download_url called without a stored name");
            return None;
        }
        Some(self.api.download_url(stored_name))
    }

    pub fn file_stats(&self) -> FileStats {
        let state = self.state.read();
        let total_size = state.items.iter().map(|f| f.file_size).sum();

        let mut type_stats = BTreeMap::new();
        for file in &state.items {
            *type_stats.entry(file_kind(&file.original_name)).or_insert(0) += 1;
        }

        FileStats {
            total_files: state.items.len(),
            total_size,
            total_size_formatted: format_file_size(total_size),
            type_stats,
        }
    }

    /// Check a file against the configured upload rules.
    pub fn validate_file<F: UploadCandidate + ?Sized>(&self, file: &F) -> ValidationResult {
        validate_file(file, &self.rules)
    }

    pub fn validate_files<F, I>(&self, files: I) -> BatchValidation<F>
    where
        F: UploadCandidate,
        I: IntoIterator<Item = F>,
    {
        validate_files(files, &self.rules)
    }

    pub fn rules(&self) -> &FileRules {
        &self.rules
    }

    pub fn clear_files(&self) {
        let mut state = self.state.write();
        state.items.clear();
        state.error = None;
        self.upload_progress.store(0, Ordering::SeqCst);
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    pub fn files(&self) -> Vec<FileMeta> {
        self.state.read().items.clone()
    }

    pub fn upload_progress(&self) -> u8 {
        self.upload_progress.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }
}
