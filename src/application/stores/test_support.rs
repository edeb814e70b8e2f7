//! Helpers for store unit tests.

use std::sync::Arc;

use serde_json::{json, Value};

pub use crate::infrastructure::http::MockTransport;
use crate::infrastructure::http::Transport;

pub fn shared(mock: MockTransport) -> Arc<dyn Transport> {
    Arc::new(mock)
}

pub fn post_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "body",
        "author": "kim",
        "isNotice": false,
        "isActive": true
    })
}

pub fn notice_json(id: i64, title: &str, pinned: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "body",
        "author": "admin",
        "isNotice": true,
        "isPinned": pinned,
        "isActive": true
    })
}
