//! # Board Client
//!
//! Smoke-test binary for the board client library.
//!
//! This entry point initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - The store context and the persisted session
//!
//! It then loads the main-page notices and the first page of posts and
//! logs what it found.

use anyhow::Result;
use tracing::{info, warn};

use board_client::config::Settings;
use board_client::domain::DEFAULT_PAGE_SIZE;
use board_client::startup::BoardContext;

#[tokio::main]
async fn main() -> Result<()> {
    board_client::telemetry::init_tracing();

    info!("Starting board client...");

    let settings = Settings::load()?;
    info!(
        board = %settings.api.base_url,
        users = %settings.api.user_service_url,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let context = BoardContext::build(settings)?;

    if context.auth.initialize().await {
        if let Some(user) = context.auth.current_user() {
            info!(username = %user.username, role = %user.role, "Session restored");
        }
    } else {
        info!("Browsing anonymously");
    }

    let notices = context.notices.fetch_for_main_page().await;
    info!(
        pinned = notices.pinned.len(),
        regular = notices.regular.len(),
        "Main page notices"
    );

    context.posts.fetch_posts(0, DEFAULT_PAGE_SIZE).await;
    match context.posts.error() {
        Some(error) => warn!(%error, "Could not load posts"),
        None => {
            let pagination = context.posts.pagination();
            info!(
                loaded = context.posts.posts().len(),
                total = pagination.total_elements,
                pages = pagination.total_pages,
                "Posts loaded"
            );
        }
    }

    Ok(())
}
