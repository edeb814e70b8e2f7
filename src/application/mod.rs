//! Application Layer
//!
//! The stores a UI binds to: posts, notices, comments, files, the session
//! and the dialog. They orchestrate the API wrappers and the domain services.

pub mod stores;

pub use stores::*;
