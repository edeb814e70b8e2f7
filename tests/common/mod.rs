//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::MockServer;

use board_client::config::Settings;
use board_client::infrastructure::http::{Credentials, HttpTransport};
use board_client::infrastructure::storage::MemoryStore;
use board_client::startup::BoardContext;

/// Path prefix under which the mock server plays the user service.
pub const USER_SERVICE_PREFIX: &str = "/users";

/// Transport pointed at a fresh mock server.
pub struct TestClient {
    pub server: MockServer,
    pub storage: Arc<MemoryStore>,
    pub credentials: Arc<Credentials>,
    pub transport: HttpTransport,
}

impl TestClient {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStore::new());
        let credentials = Arc::new(Credentials::new(storage.clone()));
        let transport = HttpTransport::new(server.uri(), Duration::from_secs(5), credentials.clone())
            .expect("transport should build");

        Self {
            server,
            storage,
            credentials,
            transport,
        }
    }

    /// Log in without going through the user service.
    pub fn sign_in(&self, token: &str) {
        let user = serde_json::from_value(test_user_json("USER")).expect("valid user");
        self.credentials.establish(token.to_string(), Some("refresh".into()), user);
    }
}

/// Settings whose services both point at `server`.
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::defaults().expect("defaults are valid");
    settings.api.base_url = server.uri();
    settings.api.user_service_url = format!("{}{}", server.uri(), USER_SERVICE_PREFIX);
    settings.api.timeout_secs = 5;
    settings
}

/// Store context against `server` with an in-memory session.
pub fn context_for(server: &MockServer) -> (BoardContext, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let context = BoardContext::with_storage(settings_for(server), storage.clone()).expect("context should build");
    (context, storage)
}

pub fn test_user_json(role: &str) -> Value {
    json!({
        "id": 1,
        "username": "testuser",
        "email": "test@example.com",
        "nickname": "Tester",
        "role": role,
        "emailVerified": true
    })
}

pub fn post_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "content",
        "author": "testuser",
        "isNotice": false,
        "viewCount": 0,
        "createdAt": "2024-05-01T10:00:00"
    })
}

pub fn notice_json(id: i64, title: &str, pinned: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "content",
        "author": "admin",
        "isNotice": true,
        "isPinned": pinned,
        "isActive": true
    })
}
