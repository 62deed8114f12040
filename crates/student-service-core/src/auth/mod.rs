//! Authentication module for managing user sessions.
//!
//! This module provides:
//! - `SessionData`: the persisted token pair and user profile
//! - `SessionStore`: load/save/clear persistence, with memory, file and
//!   OS keychain implementations
//! - `AuthService`: sign-in, sign-up, sign-out and lazy profile hydration
//!
//! The store is created once per process and shared with the `ApiClient`.

pub mod keychain;
pub mod service;
pub mod session;
pub mod store;

pub use keychain::KeyringSessionStore;
pub use service::{AuthError, AuthService};
pub use session::{AuthUser, SessionData};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
