//! REST API client module for the Student Service backend.
//!
//! This module provides the `ApiClient` for talking to the backend and
//! typed wrappers for each resource (students, courses, lecturers,
//! enrollments, users, admin reports).
//!
//! The API uses bearer token authentication; an expired access token is
//! refreshed once through `/api/v1/auth/refresh` and the request replayed.

pub mod client;
pub mod error;
pub mod query;
pub mod request;
pub mod resources;

pub use client::{build_url, parse_body, ApiClient, REFRESH_PATH};
pub use error::ApiError;
pub use query::{Pageable, QueryString};
pub use request::{Method, RequestOptions};
