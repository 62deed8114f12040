//! Typed wrappers over the backend's resource endpoints.
//!
//! Each wrapper borrows the `ApiClient` and only builds paths and decodes
//! the `{ data: ... }` envelope; all auth handling stays in the client.
//! Endpoints whose payload shape the backend does not pin down return raw
//! `serde_json::Value`.

pub mod admin;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod lecturers;
pub mod students;
pub mod users;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::decode;
use super::{ApiClient, ApiError};
use crate::models::ApiResponse;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use courses::CoursesApi;
pub use enrollments::{validate_batch, BatchError, BatchFailure, BatchOutcome, EnrollmentsApi};
pub use lecturers::LecturersApi;
pub use students::StudentsApi;
pub use users::UsersApi;

/// Prefix shared by every resource path
pub(crate) const API_PREFIX: &str = "/api/v1";

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn students(&self) -> StudentsApi<'_> {
        StudentsApi::new(self)
    }

    pub fn courses(&self) -> CoursesApi<'_> {
        CoursesApi::new(self)
    }

    pub fn enrollments(&self) -> EnrollmentsApi<'_> {
        EnrollmentsApi::new(self)
    }

    pub fn lecturers(&self) -> LecturersApi<'_> {
        LecturersApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    /// `GET /api/v1/health`
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.get(&format!("{}/health", API_PREFIX)).await
    }
}

/// Unwrap the `data` member of a response envelope.
pub(crate) fn data<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    decode::<ApiResponse<T>>(value).map(|resp| resp.data)
}
