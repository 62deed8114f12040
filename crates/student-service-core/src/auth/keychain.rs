use anyhow::{Context, Result};
use keyring::Entry;
use tracing::warn;

use super::{SessionData, SessionStore};

const SERVICE_NAME: &str = "student-service";

/// Session kept as JSON in the OS keychain.
pub struct KeyringSessionStore {
    account: String,
}

impl KeyringSessionStore {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &self.account).context("Failed to create keyring entry")
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> Option<SessionData> {
        let entry = match self.entry() {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Keychain unavailable");
                return None;
            }
        };

        let raw = match entry.get_password() {
            Ok(raw) => raw,
            // Signed out
            Err(keyring::Error::NoEntry) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read session from keychain");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed keychain session");
                None
            }
        }
    }

    fn save(&self, session: &SessionData) -> Result<()> {
        let contents = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&contents)
            .context("Failed to store session in keychain")
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete session from keychain"),
        }
    }
}
