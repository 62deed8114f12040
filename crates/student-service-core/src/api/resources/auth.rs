use serde_json::Value;

use super::{data, API_PREFIX};
use crate::api::query::encode_segment;
use crate::api::{ApiClient, ApiError, Method, RequestOptions};
use crate::models::{AuthPayload, ChangePasswordRequest, LoginRequest, RegisterRequest, User};

/// `/api/v1/auth/*`
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn path(suffix: &str) -> String {
        format!("{}/auth/{}", API_PREFIX, suffix)
    }

    /// Raw login response; `AuthService::sign_in` turns it into a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        data(self.client.post(&Self::path("login"), &body).await?)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        data(self.client.post(&Self::path("register"), request).await?)
    }

    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.client
            .request(&Self::path("logout"), RequestOptions::new(Method::Post))
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        data(self.client.get(&Self::path("me")).await?)
    }

    pub async fn check_role(&self, role: &str) -> Result<Value, ApiError> {
        let path = Self::path(&format!("check-role/{}", encode_segment(role)));
        self.client.get(&path).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<Value, ApiError> {
        let body = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.client.post(&Self::path("change-password"), &body).await
    }
}
