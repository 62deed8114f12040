//! Command implementations.

pub mod account;
pub mod admin;
pub mod enrollments;
pub mod records;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::debug;

use student_service_core::auth::{
    AuthService, FileSessionStore, KeyringSessionStore, SessionStore,
};
use student_service_core::config::SessionBackend;
use student_service_core::{ApiClient, ClientConfig, Config};

/// Keychain account the session is stored under
const KEYRING_ACCOUNT: &str = "session";

/// Everything a command needs: settings, the shared client and auth.
pub struct Context {
    pub config: Config,
    pub auth: AuthService,
}

impl Context {
    pub fn new(base_url_override: Option<&str>) -> Result<Self> {
        let config = Config::load()?;

        let mut client_config = config.client_config();
        if let Some(url) = base_url_override.filter(|u| !u.trim().is_empty()) {
            client_config = ClientConfig {
                request_timeout: client_config.request_timeout,
                ..ClientConfig::new(url)
            };
        }
        debug!(base_url = %client_config.base_url, "Resolved API base URL");

        let store: Arc<dyn SessionStore> = match config.session_backend {
            SessionBackend::File => Arc::new(FileSessionStore::new(config.cache_dir()?)),
            SessionBackend::Keyring => Arc::new(KeyringSessionStore::new(KEYRING_ACCOUNT)),
        };

        let client = ApiClient::new(&client_config, store).context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            auth: AuthService::new(client),
        })
    }

    pub fn client(&self) -> &ApiClient {
        self.auth.client()
    }
}
