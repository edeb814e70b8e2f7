//! Notice Store
//!
//! Notices are posts flagged `isNotice`. Besides the paged list and the
//! current detail, the store keeps the active, pinned, regular and expired
//! lists shown on the main page and the admin screens, plus server-side
//! counters.
//!
//! The auxiliary lists are refreshed best effort: a failed refresh empties
//! the list and is only logged.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::resource_state::{parse_id, remove_by_id, splice_by_id, ResourceState};
use crate::domain::entities::{NoticeDraft, NoticeStats, Pagination, Post, PostPatch};
use crate::domain::services::{normalize, unwrap_entity, validate_notice, validate_notice_patch};
use crate::domain::value_objects::NormalizedDetail;
use crate::infrastructure::api::NoticesApi;
use crate::infrastructure::http::QueryParams;
use crate::shared::error::ClientError;
use crate::shared::validation::validation_error;

/// Pinned and regular notices shown together on the main page.
pub const MAIN_PAGE_LIMIT: usize = 5;

pub const NOT_A_NOTICE: &str = "This post is not a notice.";

/// Notice lists beyond the paged listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeLists {
    pub active: Vec<Post>,
    pub pinned: Vec<Post>,
    pub regular: Vec<Post>,
    pub expired: Vec<Post>,
    pub stats: NoticeStats,
}

impl NoticeLists {
    fn splice(&mut self, notice: &Post) {
        for list in [&mut self.active, &mut self.pinned, &mut self.regular, &mut self.expired] {
            splice_by_id(list, notice.clone());
        }
    }

    fn remove(&mut self, id: i64) {
        for list in [&mut self.active, &mut self.pinned, &mut self.regular, &mut self.expired] {
            remove_by_id(list, id);
        }
    }
}

/// Result of [`NoticeStore::fetch_for_main_page`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MainPageNotices {
    pub pinned: Vec<Post>,
    pub regular: Vec<Post>,
}

/// Store for notices.
pub struct NoticeStore {
    api: NoticesApi,
    state: RwLock<ResourceState<Post>>,
    lists: RwLock<NoticeLists>,
}

impl NoticeStore {
    pub fn new(api: NoticesApi) -> Self {
        Self {
            api,
            state: RwLock::new(ResourceState::default()),
            lists: RwLock::new(NoticeLists::default()),
        }
    }

    /// Load one page of notices. Inactive notices need the admin listing.
    #[instrument(skip(self))]
    pub async fn fetch_notices(&self, page: u32, size: u32, include_inactive: bool) {
        self.state.write().begin();

        let query = QueryParams::paging(page, size);
        let result = if include_inactive {
            self.api.admin_list(query).await
        } else {
            self.api.list(query).await
        };

        let mut state = self.state.write();
        match result {
            Ok(listing) => {
                debug!(count = listing.content.len(), "Notices loaded");
                state.apply_page(listing, size);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load notices");
                state.fail(&e);
                state.reset_list(size);
            }
        }
        state.finish();
    }

    /// Load the detail of a notice. Posts that are not notices are rejected.
    #[instrument(skip(self))]
    pub async fn fetch_notice(&self, id: &str) {
        let id = match parse_id(id, "notice") {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Rejected notice id");
                self.state.write().fail(&e);
                return;
            }
        };

        {
            let mut state = self.state.write();
            state.begin();
            state.current = None;
        }

        let result = self
            .api
            .get(id)
            .await
            .and_then(normalize::<Post>)
            .and_then(|detail| {
                if detail.entity.is_notice {
                    Ok(detail)
                } else {
                    Err(ClientError::Rule(NOT_A_NOTICE.into()))
                }
            });

        let mut state = self.state.write();
        match result {
            Ok(detail) => state.current = Some(detail),
            Err(e) => {
                warn!(notice_id = id, error = %e, "Failed to load notice");
                state.fail(&e);
            }
        }
        state.finish();
    }

    /// Validate and create a notice. An active notice refreshes the active list.
    #[instrument(skip(self, draft))]
    pub async fn create_notice(&self, draft: &NoticeDraft) -> Result<Post, ClientError> {
        let validation = validate_notice(draft);
        if !validation.valid {
            let e = validation_error(&validation);
            self.state.write().fail(&e);
            return Err(e);
        }

        self.state.write().begin();

        let result = self.api.create(draft).await.and_then(unwrap_entity::<Post>);
        match &result {
            Ok(notice) => {
                info!(notice_id = notice.id, "Notice created");
                self.state.write().prepend(notice.clone());
                if notice.is_active {
                    self.fetch_active_notices().await;
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to create notice");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    /// Update a notice. A patch clearing the title or content is rejected
    /// before any request.
    #[instrument(skip(self, patch))]
    pub async fn update_notice(&self, id: i64, patch: &PostPatch) -> Result<Post, ClientError> {
        let validation = validate_notice_patch(patch);
        if !validation.valid {
            let e = validation_error(&validation);
            self.state.write().fail(&e);
            return Err(e);
        }

        self.state.write().begin();
        let result = self.api.update(id, patch).await.and_then(unwrap_entity::<Post>);
        self.apply_updated(id, result).await
    }

    /// Flip the active flag of a notice.
    #[instrument(skip(self))]
    pub async fn toggle_notice_status(&self, id: i64) -> Result<Post, ClientError> {
        self.state.write().begin();
        let result = self.api.toggle_status(id).await.and_then(unwrap_entity::<Post>);
        self.apply_updated(id, result).await
    }

    async fn apply_updated(&self, id: i64, result: Result<Post, ClientError>) -> Result<Post, ClientError> {
        match &result {
            Ok(notice) => {
                self.state.write().replace(notice.clone());
                self.lists.write().splice(notice);
                self.fetch_active_notices().await;
            }
            Err(e) => {
                warn!(notice_id = id, error = %e, "Failed to update notice");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    #[instrument(skip(self))]
    pub async fn delete_notice(&self, id: i64) -> Result<(), ClientError> {
        self.state.write().begin();

        let result = self.api.delete(id).await;
        match &result {
            Ok(()) => {
                self.state.write().remove(id);
                self.lists.write().remove(id);
                self.fetch_active_notices().await;
            }
            Err(e) => {
                warn!(notice_id = id, error = %e, "Failed to delete notice");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    pub async fn fetch_active_notices(&self) {
        let active = self.api.active().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load active notices");
            Vec::new()
        });
        debug!(count = active.len(), "Active notices loaded");
        self.lists.write().active = active;
    }

    pub async fn fetch_pinned_notices(&self) {
        let pinned = self.api.pinned().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load pinned notices");
            Vec::new()
        });
        self.lists.write().pinned = pinned;
    }

    pub async fn fetch_regular_notices(&self) {
        let regular = self.api.regular().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load regular notices");
            Vec::new()
        });
        self.lists.write().regular = regular;
    }

    pub async fn fetch_expired_notices(&self) {
        let expired = self.api.expired().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load expired notices");
            Vec::new()
        });
        self.lists.write().expired = expired;
    }

    /// Pinned and regular notices for the main page, fetched concurrently.
    ///
    /// Regular notices fill the slots pinned ones leave free, up to
    /// [`MAIN_PAGE_LIMIT`] in total. Any failure empties both lists.
    #[instrument(skip(self))]
    pub async fn fetch_for_main_page(&self) -> MainPageNotices {
        let result = futures::try_join!(self.api.pinned(), self.api.regular());

        let notices = match result {
            Ok((pinned, mut regular)) => {
                regular.truncate(MAIN_PAGE_LIMIT.saturating_sub(pinned.len()));
                debug!(pinned = pinned.len(), regular = regular.len(), "Main page notices loaded");
                MainPageNotices { pinned, regular }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load main page notices");
                MainPageNotices::default()
            }
        };

        let mut lists = self.lists.write();
        lists.pinned = notices.pinned.clone();
        lists.regular = notices.regular.clone();
        notices
    }

    /// Search notices. `page`/`size` override paging keys in `params`.
    #[instrument(skip(self, params))]
    pub async fn search_notices(&self, params: QueryParams, page: u32, size: u32) {
        self.state.write().begin();

        let result = self.api.search(params.merged(&QueryParams::paging(page, size))).await;

        let mut state = self.state.write();
        match result {
            Ok(listing) => state.apply_page(listing, size),
            Err(e) => {
                warn!(error = %e, "Notice search failed");
                state.fail(&e);
                state.reset_list(size);
            }
        }
        state.finish();
    }

    pub async fn fetch_stats(&self) {
        let stats = self.api.stats().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load notice stats");
            NoticeStats::default()
        });
        self.lists.write().stats = stats;
    }

    /// Activate or deactivate several notices, then reload the admin listing
    /// and the active list.
    #[instrument(skip(self))]
    pub async fn batch_update_status(&self, ids: &[i64], is_active: bool) -> Result<Value, ClientError> {
        self.state.write().begin();

        let result = self.api.batch_update_status(ids, is_active).await;
        match &result {
            Ok(_) => {
                info!(count = ids.len(), is_active, "Notice status updated");
                let Pagination { page, size, .. } = self.pagination();
                self.fetch_notices(page, size, true).await;
                self.fetch_active_notices().await;
            }
            Err(e) => {
                warn!(error = %e, "Batch status update failed");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    /// Delete several notices in one admin call.
    #[instrument(skip(self))]
    pub async fn batch_delete(&self, ids: &[i64]) -> Result<Value, ClientError> {
        self.state.write().begin();

        let result = self.api.batch_delete(ids).await;
        match &result {
            Ok(_) => {
                info!(count = ids.len(), "Notices deleted");
                {
                    let mut state = self.state.write();
                    let mut lists = self.lists.write();
                    for id in ids {
                        state.remove(*id);
                        lists.remove(*id);
                    }
                }
                self.fetch_active_notices().await;
            }
            Err(e) => {
                warn!(error = %e, "Batch delete failed");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    /// Remove expired notices on the server, then reload the counters.
    #[instrument(skip(self))]
    pub async fn cleanup_expired(&self) -> Result<Value, ClientError> {
        self.state.write().begin();

        let result = self.api.cleanup_expired().await;
        match &result {
            Ok(_) => self.fetch_stats().await,
            Err(e) => {
                warn!(error = %e, "Expired notice cleanup failed");
                self.state.write().fail(e);
            }
        }

        self.state.write().finish();
        result
    }

    /// A notice that is active and not past its expiry date.
    pub fn is_valid_notice(notice: &Post) -> bool {
        Self::is_valid_notice_at(notice, Utc::now())
    }

    pub fn is_valid_notice_at(notice: &Post, now: DateTime<Utc>) -> bool {
        notice.is_live_notice_at(now)
    }

    pub fn clear_current(&self) {
        self.state.write().clear_current();
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    /// Reset every list, the counters and the pagination.
    pub fn clear_all(&self) {
        *self.state.write() = ResourceState::default();
        *self.lists.write() = NoticeLists::default();
    }

    pub fn notices(&self) -> Vec<Post> {
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

    pub fn active_notices(&self) -> Vec<Post> {
        self.lists.read().active.clone()
    }

    pub fn pinned_notices(&self) -> Vec<Post> {
        self.lists.read().pinned.clone()
    }

    pub fn regular_notices(&self) -> Vec<Post> {
        self.lists.read().regular.clone()
    }

    pub fn expired_notices(&self) -> Vec<Post> {
        self.lists.read().expired.clone()
    }

    pub fn stats(&self) -> NoticeStats {
        self.lists.read().stats
    }

    pub fn active_count(&self) -> usize {
        self.lists.read().active.len()
    }

    pub fn pinned_count(&self) -> usize {
        self.lists.read().pinned.len()
    }

    pub fn regular_count(&self) -> usize {
        self.lists.read().regular.len()
    }

    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }

    pub fn has_pinned(&self) -> bool {
        self.pinned_count() > 0
    }
}
