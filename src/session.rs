use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::UserProfile;

/// Persisted credentials: the bearer token and the profile it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, AppError>;
    fn save(&self, session: &Session) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;

    fn token(&self) -> Result<String, AppError> {
        self.load()?
            .map(|s| s.token)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingToken)
    }
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // An unreadable session is treated as logged out.
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("ignoring corrupt session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, body)?;
        debug!("session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Some(Session {
                token: token.into(),
                user: UserProfile::default(),
            })),
        }
    }
}

impl MemorySessionStore {
    // a panic elsewhere while holding the lock leaves the slot itself intact
    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, AppError> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> Result<(), AppError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.slot() = None;
        Ok(())
    }
}
