use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::SessionData;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Persistence for the current session.
///
/// Reads and writes are whole-session: the most recent `save` wins.
/// `load` never fails; unreadable or malformed data counts as no session.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<SessionData>;

    fn save(&self, session: &SessionData) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn access_token(&self) -> Option<String> {
        self.load().map(|s| s.token).filter(|t| !t.is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.load()
            .and_then(|s| s.refresh_token)
            .filter(|t| !t.is_empty())
    }
}

/// In-process store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    data: RwLock<Option<SessionData>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: SessionData) -> Self {
        Self {
            data: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<SessionData> {
        self.data.read().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, session: &SessionData) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("Session lock poisoned"))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("Session lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Session persisted as JSON in the cache directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    cache_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }

    fn read(path: &Path) -> Result<Option<SessionData>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).context("Failed to read session file")?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        let data = serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(data))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<SessionData> {
        match Self::read(&self.path()) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session file");
                None
            }
        }
    }

    fn save(&self, session: &SessionData) -> Result<()> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;
        debug!(path = %path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}
