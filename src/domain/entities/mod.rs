//! # Domain Entities
//!
//! Records served by the board REST API, as the client sees them.
//!
//! ## Core Entities
//!
//! - **Post**: A board post; notices are posts flagged `isNotice`
//! - **Comment**: A comment on a post
//! - **FileMeta**: Metadata of a file attached to a post
//! - **User**: The authenticated account
//!
//! ## Supporting Types
//!
//! - **Pagination / Page**: Server page envelopes and the client's page state
//! - **UploadFile / FileDescriptor**: Files selected for upload
//! - Drafts and patches sent to the server

mod comment;
mod file;
mod pagination;
mod post;
mod user;

/// An entity identified by a server-assigned integer id.
pub trait Resource {
    fn id(&self) -> i64;
}

pub use comment::{Comment, CommentDraft};
pub use file::{FileDescriptor, FileMeta, UploadCandidate, UploadFile};
pub use pagination::{Listing, Page, Pagination, DEFAULT_PAGE_SIZE};
pub use post::{NoticeDraft, NoticeStats, Post, PostDraft, PostPatch};
pub use user::{
    LoginRequest, LoginResponse, PasswordChange, ProfileUpdate, RefreshedToken, RegisterRequest,
    User, UserRole,
};
