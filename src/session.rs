//! Access-token storage.
//!
//! The backend issues a bearer token at login. The transport reads it
//! before every request and clears it when the backend answers 401.
//! Tokens are held in `Zeroizing` buffers and never logged.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::SESSION_MAX_AGE_SECS;
use crate::error::ClientError;

/// Where the current access token lives.
pub trait TokenStore: Send + Sync {
    /// Current token, `None` when logged out or expired.
    fn token(&self) -> Option<Zeroizing<String>>;

    /// Replace the stored token.
    fn set_token(&self, token: &str) -> Result<(), ClientError>;

    /// Forget the stored token.
    fn clear(&self) -> Result<(), ClientError>;

    fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

// ═══════════════════════════════════════════════════════════
// MemoryTokenStore
// ═══════════════════════════════════════════════════════════

/// Process-local token store; gone when the process exits.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<Zeroizing<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(Zeroizing::new(token.to_string()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<Zeroizing<String>> {
        self.token.lock().ok()?.clone()
    }

    fn set_token(&self, token: &str) -> Result<(), ClientError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| ClientError::Session("token lock poisoned".into()))?;
        *guard = Some(Zeroizing::new(token.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| ClientError::Session("token lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// FileTokenStore
// ═══════════════════════════════════════════════════════════

#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct StoredSession {
    token: String,
    #[zeroize(skip)]
    expires_at: DateTime<Utc>,
}

/// Token persisted to a JSON file with a fixed max-age.
///
/// Expired or unreadable files read as "no token".
pub struct FileTokenStore {
    path: PathBuf,
    max_age: Duration,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: Duration::seconds(SESSION_MAX_AGE_SECS),
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<StoredSession> {
        let raw = Zeroizing::new(fs::read_to_string(&self.path).ok()?);
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<Zeroizing<String>> {
        let stored = self.read()?;
        if stored.expires_at <= Utc::now() {
            tracing::debug!("Stored session expired");
            return None;
        }
        Some(Zeroizing::new(stored.token.clone()))
    }

    fn set_token(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::Session(e.to_string()))?;
        }
        let stored = StoredSession {
            token: token.to_string(),
            expires_at: Utc::now() + self.max_age,
        };
        let body = Zeroizing::new(
            serde_json::to_string(&stored).map_err(|e| ClientError::Session(e.to_string()))?,
        );
        let mut file = open_private(&self.path)?;
        file.write_all(body.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| ClientError::Session(e.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(e.to_string())),
        }
    }
}

/// Open `path` for writing, owner-only from creation on.
///
/// A file left with wider permissions by an earlier version is
/// tightened before any content is written.
#[cfg(unix)]
fn open_private(path: &Path) -> Result<File, ClientError> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(|e| ClientError::Session(e.to_string()))?;
    file.set_permissions(fs::Permissions::from_mode(0o600))
        .map_err(|e| ClientError::Session(e.to_string()))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> Result<File, ClientError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| ClientError::Session(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(!store.has_token());
        store.set_token("abc").unwrap();
        assert_eq!(store.token().unwrap().as_str(), "abc");
        store.clear().unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileTokenStore::new(&path).set_token("persisted").unwrap();
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.token().unwrap().as_str(), "persisted");
    }

    #[test]
    fn file_store_expired_token_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            FileTokenStore::new(dir.path().join("s.json")).with_max_age(Duration::seconds(-1));
        store.set_token("stale").unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("s.json"));
        store.clear().unwrap();
        store.set_token("t").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_corrupt_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "not json").unwrap();
        assert!(FileTokenStore::new(&path).token().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("s.json"));
        store.set_token("t").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn file_store_tightens_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.set_token("fresh").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.token().unwrap().as_str(), "fresh");
    }

    #[cfg(unix)]
    #[test]
    fn private_file_created_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.json");
        let file = open_private(&path).unwrap();
        let mode = file.metadata().unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn overwrite_leaves_no_stale_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("s.json"));
        store.set_token("a-much-longer-first-token").unwrap();
        store.set_token("short").unwrap();
        assert_eq!(store.token().unwrap().as_str(), "short");
    }
}
