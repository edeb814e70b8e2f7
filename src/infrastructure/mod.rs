//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - HTTP transport to the board and user services (reqwest)
//! - Typed REST API wrappers
//! - Key-value storage for the persisted session

pub mod api;
pub mod http;
pub mod storage;
