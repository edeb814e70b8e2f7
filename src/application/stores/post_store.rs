//! Post Store
//!
//! List, detail and CRUD state for board posts.

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use super::resource_state::{parse_id, ResourceState};
use crate::domain::entities::{Pagination, Post, PostDraft, PostPatch};
use crate::domain::services::{normalize, unwrap_entity};
use crate::domain::value_objects::NormalizedDetail;
use crate::infrastructure::api::PostsApi;
use crate::infrastructure::http::QueryParams;
use crate::shared::error::ClientError;
use crate::shared::validation::ensure_valid;

/// Store for board posts.
pub struct PostStore {
    api: PostsApi,
    state: RwLock<ResourceState<Post>>,
}

impl PostStore {
    pub fn new(api: PostsApi) -> Self {
        Self {
            api,
            state: RwLock::new(ResourceState::default()),
        }
    }

    /// Load one page of posts.
    pub async fn fetch_posts(&self, page: u32, size: u32) {
        self.fetch_posts_filtered(page, size, QueryParams::new()).await
    }

    /// Load one page of posts with extra filters. `page`/`size` override any
    /// paging keys in `filters`.
    #[instrument(skip(self, filters))]
    pub async fn fetch_posts_filtered(&self, page: u32, size: u32, filters: QueryParams) {
        self.state.write().begin();

        let result = self.api.list(filters.merged(&QueryParams::paging(page, size))).await;

        let mut state = self.state.write();
        match result {
            Ok(listing) => {
                debug!(count = listing.content.len(), "Posts loaded");
                state.apply_page(listing, size);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load posts");
                state.fail(&e);
                state.reset_list(size);
            }
        }
        state.finish();
    }

    /// Load the detail of a post. `id` comes from a route and must be a positive integer.
    #[instrument(skip(self))]
    pub async fn fetch_post(&self, id: &str) {
        let id = match parse_id(id, "post") {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Rejected post id");
                self.state.write().fail(&e);
                return;
            }
        };

        {
            let mut state = self.state.write();
            state.begin();
            state.current = None;
        }

        let result = self.api.get(id).await.and_then(normalize::<Post>);

        let mut state = self.state.write();
        match result {
            Ok(detail) => state.current = Some(detail),
            Err(e) => {
                warn!(post_id = id, error = %e, "Failed to load post");
                state.fail(&e);
            }
        }
        state.finish();
    }

    /// Create a post and put it at the head of the list.
    #[instrument(skip(self, draft))]
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, ClientError> {
        if let Err(e) = ensure_valid(draft) {
            self.state.write().fail(&e);
            return Err(e);
        }

        self.state.write().begin();

        let result = self.api.create(draft).await.and_then(unwrap_entity::<Post>);

        let mut state = self.state.write();
        match &result {
            Ok(post) => {
                debug!(post_id = post.id, "Post created");
                state.prepend(post.clone());
            }
            Err(e) => {
                warn!(error = %e, "Failed to create post");
                state.fail(e);
            }
        }
        state.finish();
        result
    }

    /// Update a post in place.
    #[instrument(skip(self, patch))]
    pub async fn update_post(&self, id: i64, patch: &PostPatch) -> Result<Post, ClientError> {
        self.state.write().begin();

        let result = self.api.update(id, patch).await.and_then(unwrap_entity::<Post>);

        let mut state = self.state.write();
        match &result {
            Ok(post) => state.replace(post.clone()),
            Err(e) => {
                warn!(post_id = id, error = %e, "Failed to update post");
                state.fail(e);
            }
        }
        state.finish();
        result
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        self.state.write().begin();

        let result = self.api.delete(id).await;

        let mut state = self.state.write();
        match &result {
            Ok(()) => state.remove(id),
            Err(e) => {
                warn!(post_id = id, error = %e, "Failed to delete post");
                state.fail(e);
            }
        }
        state.finish();
        result
    }

    /// Search posts. `page`/`size` override paging keys in `params`.
    #[instrument(skip(self, params))]
    pub async fn search_posts(&self, params: QueryParams, page: u32, size: u32) {
        self.state.write().begin();

        let result = self.api.search(params.merged(&QueryParams::paging(page, size))).await;

        let mut state = self.state.write();
        match result {
            Ok(listing) => state.apply_page(listing, size),
            Err(e) => {
                warn!(error = %e, "Post search failed");
                state.fail(&e);
                state.reset_list(size);
            }
        }
        state.finish();
    }

    pub fn clear_current(&self) {
        self.state.write().clear_current();
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    pub fn posts(&self) -> Vec<Post> {
        self.state.read().items.clone()
    }

    pub fn current(&self) -> Option<NormalizedDetail<Post>> {
        self.state.read().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.state.read().pagination
    }

    pub fn snapshot(&self) -> ResourceState<Post> {
        self.state.read().clone()
    }
}
