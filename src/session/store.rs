use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::model::{Role, Session, SessionBlob};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session storage: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key/value storage the session store persists into.
///
/// Writes are atomic per key.
pub trait SessionBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn write(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// One JSON file per key inside a directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage, used by tests and short-lived embeddings.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Typed accessor over the two per-role session blobs.
///
/// Cheap to clone; every view and API client holds the same instance.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(dir)))
    }

    /// Persist `session` under its role, replacing any previous one.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let json = serde_json::to_string(&session.to_blob())?;
        self.backend.write(session.role.storage_key(), &json)?;
        log::debug!("Saved {} session", session.role);
        Ok(())
    }

    /// Current session for `role`.
    ///
    /// Missing, unreadable and malformed blobs all read as `None`.
    pub fn get(&self, role: Role) -> Option<Session> {
        let raw = match self.backend.read(role.storage_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read {} session: {}", role, e);
                return None;
            }
        };

        match serde_json::from_str::<SessionBlob>(&raw) {
            Ok(blob) => blob.into_session(role),
            Err(e) => {
                log::warn!("Discarding malformed {} session: {}", role, e);
                None
            }
        }
    }

    /// Remove the session for `role`. Clearing an absent session is a no-op.
    pub fn clear(&self, role: Role) -> Result<(), SessionError> {
        self.backend.remove(role.storage_key())?;
        log::debug!("Cleared {} session", role);
        Ok(())
    }

    pub fn is_authenticated(&self, role: Role) -> bool {
        self.get(role).is_some()
    }
}
