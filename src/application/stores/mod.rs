//! Stores
//!
//! Client-side state containers. Each store owns its state behind a lock and
//! is shared by reference; no lock is held across a network call.
//!
//! Read operations (`fetch_*`, `search_*`) record failures in the store's
//! `error` field. Write operations record them as well and also return them.

mod auth_store;
mod comment_store;
mod file_store;
mod modal_store;
mod notice_store;
mod post_store;
mod resource_state;

#[cfg(test)]
mod test_support;

pub use auth_store::AuthStore;
pub use comment_store::CommentStore;
pub use file_store::{FileStats, FileStore};
pub use modal_store::{ConfirmOptions, ModalKind, ModalReply, ModalStore, ModalView};
pub use notice_store::{MainPageNotices, NoticeLists, NoticeStore, MAIN_PAGE_LIMIT};
pub use post_store::PostStore;
pub use resource_state::{parse_id, ResourceState};
