//! Session credentials shared by the auth store and the HTTP transports.
//!
//! Tokens and the user profile are mirrored into a [`KeyValueStore`] so that a
//! restarted client can restore them. Storage failures are logged and do not
//! affect the in-memory session.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::entities::User;
use crate::infrastructure::storage::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// In-memory view of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Credentials holder backed by persistent storage.
pub struct Credentials {
    storage: Arc<dyn KeyValueStore>,
    session: RwLock<Session>,
}

impl Credentials {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            session: RwLock::new(Session::default()),
        }
    }

    /// Load a persisted session. Returns `true` if a token and user were found.
    ///
    /// The restored session is not yet verified against the server.
    pub fn restore(&self) -> bool {
        let access_token = self.read(ACCESS_TOKEN_KEY);
        let refresh_token = self.read(REFRESH_TOKEN_KEY);
        let user = self.read(USER_KEY).and_then(|raw| {
            serde_json::from_str::<User>(&raw)
                .map_err(|e| warn!(error = %e, "Discarding unreadable stored user"))
                .ok()
        });

        match (access_token, user) {
            (Some(access_token), Some(user)) => {
                debug!(user = %user.username, "Restored persisted session");
                *self.session.write() = Session {
                    access_token: Some(access_token),
                    refresh_token,
                    user: Some(user),
                };
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.session.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.session.read().refresh_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// Start a session after login.
    pub fn establish(&self, access_token: String, refresh_token: Option<String>, user: User) {
        self.write(ACCESS_TOKEN_KEY, &access_token);
        if let Some(refresh) = &refresh_token {
            self.write(REFRESH_TOKEN_KEY, refresh);
        }
        self.write_user(&user);

        *self.session.write() = Session {
            access_token: Some(access_token),
            refresh_token,
            user: Some(user),
        };
    }

    pub fn set_access_token(&self, access_token: String) {
        self.write(ACCESS_TOKEN_KEY, &access_token);
        self.session.write().access_token = Some(access_token);
    }

    pub fn set_user(&self, user: User) {
        self.write_user(&user);
        self.session.write().user = Some(user);
    }

    /// Drop the session from memory and storage.
    pub fn invalidate(&self) {
        let had_session = {
            let mut session = self.session.write();
            let had = session.is_authenticated();
            *session = Session::default();
            had
        };

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to clear stored credential");
            }
        }

        if had_session {
            info!("Session cleared");
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.storage
            .get(key)
            .map_err(|e| warn!(key, error = %e, "Failed to read stored credential"))
            .ok()
            .flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!(key, error = %e, "Failed to persist credential");
        }
    }

    fn write_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.write(USER_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize user"),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
