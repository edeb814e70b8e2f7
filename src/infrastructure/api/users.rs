//! User service API.
//!
//! Every user-service response wraps its payload in `{ "data": ... }`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{decode, SharedTransport};
use crate::domain::entities::{
    LoginRequest, LoginResponse, PasswordChange, ProfileUpdate, RefreshedToken, RegisterRequest, User,
};
use crate::infrastructure::http::{ApiRequest, QueryParams};
use crate::shared::error::ClientError;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

fn unwrap_data<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    let envelope: Envelope<T> = decode(value)?;
    Ok(envelope.data)
}

/// Wrapper over the user service.
#[derive(Clone)]
pub struct UsersApi {
    transport: SharedTransport,
}

impl UsersApi {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        unwrap_data(self.transport.send(ApiRequest::post("/register").json(request)?).await?)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        unwrap_data(self.transport.send(ApiRequest::post("/login").json(request)?).await?)
    }

    pub async fn current_user(&self) -> Result<User, ClientError> {
        unwrap_data(self.transport.send(ApiRequest::get("/me")).await?)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        unwrap_data(self.transport.send(ApiRequest::put("/me").json(update)?).await?)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ClientError> {
        self.transport.send(ApiRequest::put("/me/password").json(change)?).await?;
        Ok(())
    }

    /// `true` when the username is still available.
    pub async fn check_username(&self, username: &str) -> Result<bool, ClientError> {
        let request = ApiRequest::get("/check-username").query(QueryParams::new().with("username", username));
        unwrap_data(self.transport.send(request).await?)
    }

    /// `true` when the email is still available.
    pub async fn check_email(&self, email: &str) -> Result<bool, ClientError> {
        let request = ApiRequest::get("/check-email").query(QueryParams::new().with("email", email));
        unwrap_data(self.transport.send(request).await?)
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), ClientError> {
        self.transport
            .send(ApiRequest::post("/verify-email").json(&json!({ "token": token }))?)
            .await?;
        Ok(())
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, ClientError> {
        let request = ApiRequest::post("/refresh").json(&json!({ "refreshToken": refresh_token }))?;
        unwrap_data(self.transport.send(request).await?)
    }
}
