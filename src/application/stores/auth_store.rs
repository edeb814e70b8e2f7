//! Auth Store
//!
//! Session lifecycle against the user service. Tokens and the profile live
//! in [`Credentials`], which the HTTP transports read to authorize requests
//! and clear on a 401.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::entities::{
    LoginRequest, LoginResponse, PasswordChange, ProfileUpdate, RegisterRequest, User, UserRole,
};
use crate::infrastructure::api::UsersApi;
use crate::infrastructure::http::Credentials;
use crate::shared::error::ClientError;
use crate::shared::validation::ensure_valid;

#[derive(Debug, Default)]
struct AuthState {
    loading: bool,
    error: Option<String>,
}

/// Store for the authenticated session.
pub struct AuthStore {
    api: UsersApi,
    credentials: Arc<Credentials>,
    state: RwLock<AuthState>,
}

impl AuthStore {
    pub fn new(api: UsersApi, credentials: Arc<Credentials>) -> Self {
        Self {
            api,
            credentials,
            state: RwLock::new(AuthState::default()),
        }
    }

    /// Restore a persisted session and check it against the server.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> bool {
        if !self.credentials.restore() {
            debug!("No persisted session");
            return false;
        }
        self.validate_token().await
    }

    /// `true` if the current token is accepted. A rejected token logs out.
    #[instrument(skip(self))]
    pub async fn validate_token(&self) -> bool {
        if !self.credentials.is_authenticated() {
            return false;
        }

        match self.api.current_user().await {
            Ok(user) => {
                self.credentials.set_user(user);
                true
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed");
                self.logout();
                false
            }
        }
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        self.run(ensure_valid(request), || self.api.register(request)).await
    }

    /// Log in and persist the session.
    #[instrument(skip(self, request), fields(user = %request.username_or_email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let response = self.run(ensure_valid(request), || self.api.login(request)).await?;

        self.credentials.establish(
            response.access_token.clone(),
            response.refresh_token.clone(),
            response.user.clone(),
        );
        info!(username = %response.user.username, "Logged in");
        Ok(response)
    }

    /// Clear the session from memory and storage.
    pub fn logout(&self) {
        self.credentials.invalidate();
        self.state.write().error = None;
    }

    /// Reload the profile. Returns `None` when not logged in; a failure logs out.
    #[instrument(skip(self))]
    pub async fn fetch_current_user(&self) -> Result<Option<User>, ClientError> {
        if !self.credentials.is_authenticated() {
            return Ok(None);
        }

        match self.api.current_user().await {
            Ok(user) => {
                self.credentials.set_user(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Failed to load current user");
                self.logout();
                Err(e)
            }
        }
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        let user = self.run(ensure_valid(update), || self.api.update_profile(update)).await?;
        self.credentials.set_user(user.clone());
        Ok(user)
    }

    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ClientError> {
        self.run(ensure_valid(change), || self.api.change_password(change)).await?;
        info!("Password changed");
        Ok(())
    }

    /// Whether `username` is free. Errors count as unavailable.
    pub async fn check_username(&self, username: &str) -> bool {
        self.api.check_username(username).await.unwrap_or_else(|e| {
            warn!(error = %e, "Username availability check failed");
            false
        })
    }

    /// Whether `email` is free. Errors count as unavailable.
    pub async fn check_email(&self, email: &str) -> bool {
        self.api.check_email(email).await.unwrap_or_else(|e| {
            warn!(error = %e, "Email availability check failed");
            false
        })
    }

    /// Confirm an email address, then reload the profile when logged in.
    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> Result<(), ClientError> {
        self.api.verify_email(token).await.map_err(|e| {
            warn!(error = %e, "Email verification failed");
            e
        })?;

        if self.credentials.is_authenticated() {
            self.fetch_current_user().await?;
        }
        Ok(())
    }

    /// Exchange the refresh token for a new access token. Logs out without
    /// a refresh token or when the exchange fails.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> bool {
        let Some(refresh_token) = self.credentials.refresh_token() else {
            self.logout();
            return false;
        };

        match self.api.refresh(&refresh_token).await {
            Ok(refreshed) => {
                self.credentials.set_access_token(refreshed.access_token);
                debug!("Access token refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                self.logout();
                false
            }
        }
    }

    /// Validate, then run `call` with the loading/error lifecycle.
    async fn run<T, F, Fut>(&self, validation: Result<(), ClientError>, call: F) -> Result<T, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, ClientError>>,
    {
        if let Err(e) = validation {
            self.state.write().error = Some(e.user_message());
            return Err(e);
        }

        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = call().await;

        let mut state = self.state.write();
        if let Err(e) = &result {
            warn!(error = %e, "User service call failed");
            state.error = Some(e.user_message());
        }
        state.loading = false;
        result
    }

    pub fn current_user(&self) -> Option<User> {
        self.credentials.user()
    }

    pub fn access_token(&self) -> Option<String> {
        self.credentials.access_token()
    }

    pub fn is_logged_in(&self) -> bool {
        let session = self.credentials.snapshot();
        session.is_authenticated() && session.user.is_some()
    }

    pub fn user_role(&self) -> UserRole {
        self.credentials.user().map(|u| u.role).unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.user_role() == UserRole::Admin
    }

    pub fn is_moderator(&self) -> bool {
        self.user_role().can_moderate()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }
}
