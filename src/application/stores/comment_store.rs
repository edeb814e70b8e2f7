//! Comment Store

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use super::resource_state::ResourceState;
use crate::domain::entities::{Comment, CommentDraft};
use crate::domain::services::unwrap_entity;
use crate::infrastructure::api::CommentsApi;
use crate::shared::error::ClientError;
use crate::shared::validation::ensure_valid;

/// Comments of the post being viewed, oldest first.
pub struct CommentStore {
    api: CommentsApi,
    state: RwLock<ResourceState<Comment>>,
}

impl CommentStore {
    pub fn new(api: CommentsApi) -> Self {
        Self {
            api,
            state: RwLock::new(ResourceState::default()),
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_comments(&self, post_id: i64) {
        self.state.write().begin();

        let result = self.api.by_post(post_id).await;

        let mut state = self.state.write();
        match result {
            Ok(comments) => {
                debug!(count = comments.len(), "Comments loaded");
                state.items = comments;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load comments");
                state.fail(&e);
                state.items.clear();
            }
        }
        state.finish();
    }

    /// Create a comment and append it; comments are listed chronologically.
    #[instrument(skip(self, draft), fields(post_id = draft.post_id))]
    pub async fn create_comment(&self, draft: &CommentDraft) -> Result<Comment, ClientError> {
        if let Err(e) = ensure_valid(draft) {
            self.state.write().fail(&e);
            return Err(e);
        }

        self.state.write().begin();

        let result = self.api.create(draft).await.and_then(unwrap_entity::<Comment>);

        let mut state = self.state.write();
        match &result {
            Ok(comment) => state.append(comment.clone()),
            Err(e) => {
                warn!(error = %e, "Failed to create comment");
                state.fail(e);
            }
        }
        state.finish();
        result
    }

    #[instrument(skip(self, content))]
    pub async fn update_comment(&self, id: i64, content: &str) -> Result<Comment, ClientError> {
        if content.trim().is_empty() {
            let e = ClientError::Validation("Content is required".into());
            self.state.write().fail(&e);
            return Err(e);
        }

        self.state.write().begin();

        let result = self.api.update(id, content).await.and_then(unwrap_entity::<Comment>);

        let mut state = self.state.write();
        match &result {
            Ok(comment) => state.replace(comment.clone()),
            Err(e) => {
                warn!(comment_id = id, error = %e, "Failed to update comment");
                state.fail(e);
            }
        }
        state.finish();
        result
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: i64) -> Result<(), ClientError> {
        self.state.write().begin();

        let result = self.api.delete(id).await;

        let mut state = self.state.write();
        match &result {
            Ok(()) => state.remove(id),
            Err(e) => {
                warn!(comment_id = id, error = %e, "Failed to delete comment");
                state.fail(e);
            }
        }
        state.finish();
        result
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }
}
