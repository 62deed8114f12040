//! Student Service core library.
//!
//! This crate talks to the Student Service REST backend on behalf of the
//! console front-ends. It provides:
//!
//! - `ApiClient`: bearer-token HTTP client with single-shot refresh-and-retry
//! - `SessionStore` and its memory, file and keyring implementations
//! - Typed resource wrappers for students, courses, lecturers, enrollments,
//!   users and admin reports
//! - Client-side search helpers, batch enrollment and demo data seeding

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod search;
pub mod seed;
pub mod utils;

pub use api::{ApiClient, ApiError, Method, RequestOptions};
pub use auth::{AuthService, SessionData, SessionStore};
pub use config::{ClientConfig, Config};
