//! Application Startup
//!
//! Builds the per-session [`BoardContext`]: one instance of every store,
//! wired to transports for the board and user services and to the
//! persisted session.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::{AuthStore, CommentStore, FileStore, ModalStore, NoticeStore, PostStore};
use crate::config::Settings;
use crate::domain::services::FileRules;
use crate::infrastructure::api::{CommentsApi, FilesApi, NoticesApi, PostsApi, UsersApi};
use crate::infrastructure::http::{Credentials, HttpTransport, Transport};
use crate::infrastructure::storage::{JsonFileStore, KeyValueStore};

/// Stores shared by one client session.
pub struct BoardContext {
    pub posts: PostStore,
    pub notices: NoticeStore,
    pub comments: CommentStore,
    pub files: FileStore,
    pub auth: AuthStore,
    pub modal: ModalStore,
    pub credentials: Arc<Credentials>,
    pub settings: Arc<Settings>,
}

impl BoardContext {
    /// Build the context from settings, persisting the session to
    /// `storage.session_path`.
    pub fn build(settings: Settings) -> Result<Self> {
        let storage = JsonFileStore::open(Path::new(&settings.storage.session_path))
            .with_context(|| format!("failed to open session store at {}", settings.storage.session_path))?;
        tracing::info!(path = %storage.path().display(), "Session store ready");

        Self::with_storage(settings, Arc::new(storage))
    }

    /// Build the context over an explicit key-value store.
    pub fn with_storage(settings: Settings, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let credentials = Arc::new(Credentials::new(storage));
        let timeout = settings.api.timeout();

        let board: Arc<dyn Transport> = Arc::new(
            HttpTransport::new(&settings.api.base_url, timeout, credentials.clone())
                .context("failed to create board API client")?,
        );
        let users: Arc<dyn Transport> = Arc::new(
            HttpTransport::new(&settings.api.user_service_url, timeout, credentials.clone())
                .context("failed to create user service client")?,
        );
        tracing::info!(
            board = %settings.api.base_url,
            users = %settings.api.user_service_url,
            "HTTP clients created"
        );

        Ok(Self::with_transports(settings, board, users, credentials))
    }

    /// Wire stores to the given transports.
    pub fn with_transports(
        settings: Settings,
        board: Arc<dyn Transport>,
        users: Arc<dyn Transport>,
        credentials: Arc<Credentials>,
    ) -> Self {
        let rules = FileRules::from_settings(&settings.upload);

        Self {
            posts: PostStore::new(PostsApi::new(board.clone())),
            notices: NoticeStore::new(NoticesApi::new(board.clone())),
            comments: CommentStore::new(CommentsApi::new(board.clone())),
            files: FileStore::new(FilesApi::new(board), rules),
            auth: AuthStore::new(UsersApi::new(users), credentials.clone()),
            modal: ModalStore::new(),
            credentials,
            settings: Arc::new(settings),
        }
    }
}
