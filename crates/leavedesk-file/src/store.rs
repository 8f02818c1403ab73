//! JSON-file session storage.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use leavedesk_core::error::StoreError;
use leavedesk_core::{AccessToken, RefreshToken, Result, SessionStore, TokenKey};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// File name used under the default data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// On-disk shape of the session file.
#[derive(Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

impl StoredSession {
    fn slot(&mut self, key: TokenKey) -> &mut Option<String> {
        match key {
            TokenKey::Access => &mut self.access,
            TokenKey::Refresh => &mut self.refresh,
        }
    }
}

/// A [`SessionStore`] persisted as a JSON object in a single file.
///
/// Writes replace the file atomically and are serialized across processes
/// with an advisory lock on a sibling `.lock` file. A missing file is an
/// empty session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at [`default_location`](Self::default_location).
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_location()?))
    }

    /// The per-user session file, e.g. `~/.local/share/leavedesk/session.json`.
    pub fn default_location() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "leavedesk").ok_or_else(|| StoreError::Location {
            message: "could not determine a home directory".to_string(),
        })?;
        Ok(dirs.data_dir().join(SESSION_FILE_NAME))
    }

    /// Get the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        sibling(&self.path, "lock")
    }

    fn temp_path(&self) -> PathBuf {
        sibling(&self.path, "tmp")
    }

    fn read(&self) -> Result<StoredSession> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoredSession::default()),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self, session: &StoredSession) -> Result<()> {
        let temp_path = self.temp_path();
        let json = serde_json::to_string_pretty(session)?;

        let mut file = File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;

        // Restrict before any secret is written.
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            file.set_permissions(perms)
                .map_err(|e| io_error(&temp_path, e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| io_error(&temp_path, e))?;
        file.sync_data().map_err(|e| io_error(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| io_error(&self.path, e))
    }

    /// Run `f` while holding the exclusive store lock.
    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| io_error(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| io_error(&lock_path, e))?;

        let result = f();

        if let Err(e) = lock_file.unlock() {
            warn!(path = %lock_path.display(), error = %e, "Failed to release session lock");
        }

        result
    }

    /// Run a read-modify-write cycle under the store lock.
    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut StoredSession),
    {
        self.with_lock(|| {
            let mut session = self.read()?;
            apply(&mut session);
            self.write(&session)
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: TokenKey) -> Result<Option<String>> {
        let mut session = self.read()?;
        Ok(session.slot(key).take())
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        self.update(|session| *session.slot(key) = Some(value.to_string()))?;
        debug!("Stored session entry");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: TokenKey) -> Result<()> {
        self.update(|session| *session.slot(key) = None)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        self.with_lock(|| match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&self.path, e)),
        })
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn save(&self, access: &AccessToken, refresh: &RefreshToken) -> Result<()> {
        self.update(|session| {
            session.access = Some(access.as_str().to_string());
            session.refresh = Some(refresh.as_str().to_string());
        })?;
        debug!("Stored session");
        Ok(())
    }
}

/// `session.json` -> `session.json.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn io_error(path: &Path, err: io::Error) -> leavedesk_core::Error {
    StoreError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use leavedesk_core::error::Error;
    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn missing_file_is_empty_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get(TokenKey::Access).unwrap(), None);
        assert_eq!(store.refresh_token().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&AccessToken::new("access-1"), &RefreshToken::new("refresh-1"))
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get(TokenKey::Access).unwrap().as_deref(),
            Some("access-1")
        );
        assert_eq!(
            reopened.get(TokenKey::Refresh).unwrap().as_deref(),
            Some("refresh-1")
        );
    }

    #[test]
    fn file_uses_literal_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKey::Access, "a").unwrap();
        store.set(TokenKey::Refresh, "r").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({ "access": "a", "refresh": "r" }));
    }

    #[test]
    fn set_replaces_only_its_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKey::Access, "old").unwrap();
        store.set(TokenKey::Refresh, "refresh").unwrap();
        store.set(TokenKey::Access, "new").unwrap();

        assert_eq!(store.get(TokenKey::Access).unwrap().as_deref(), Some("new"));
        assert_eq!(
            store.get(TokenKey::Refresh).unwrap().as_deref(),
            Some("refresh")
        );
    }

    #[test]
    fn remove_keeps_other_entry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKey::Access, "a").unwrap();
        store.set(TokenKey::Refresh, "r").unwrap();

        store.remove(TokenKey::Access).unwrap();

        assert_eq!(store.get(TokenKey::Access).unwrap(), None);
        assert_eq!(store.get(TokenKey::Refresh).unwrap().as_deref(), Some("r"));
    }

    #[test]
    fn clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKey::Access, "a").unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.get(TokenKey::Access).unwrap(), None);

        // Clearing an empty store is fine.
        store.clear().unwrap();
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/deeper/session.json"));

        store.set(TokenKey::Refresh, "r").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKey::Access, "a").unwrap();

        assert!(!dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.get(TokenKey::Access).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Corrupt { .. })));

        // A write does not silently discard the corrupt file.
        let err = store.set(TokenKey::Access, "a").unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKey::Access, "secret").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn sibling_paths() {
        let path = Path::new("/tmp/ld/session.json");
        assert_eq!(sibling(path, "lock"), Path::new("/tmp/ld/session.json.lock"));
        assert_eq!(sibling(path, "tmp"), Path::new("/tmp/ld/session.json.tmp"));
    }

    #[test]
    fn default_location_ends_with_file_name() {
        // Sandboxed CI may lack a home directory.
        if let Ok(path) = FileSessionStore::default_location() {
            assert!(path.ends_with(SESSION_FILE_NAME));
        }
    }

    /// Holds the store lock from the test until the returned file is unlocked.
    fn hold_lock(store: &FileSessionStore) -> File {
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(store.lock_path())
            .unwrap();
        lock.lock_exclusive().unwrap();
        lock
    }

    #[test]
    fn save_replaces_pair_in_one_locked_write() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&AccessToken::new("old-a"), &RefreshToken::new("old-r"))
            .unwrap();

        let lock = hold_lock(&store);
        let writer = store.clone();
        let handle = thread::spawn(move || {
            writer.save(&AccessToken::new("new-a"), &RefreshToken::new("new-r"))
        });
        thread::sleep(Duration::from_millis(50));

        // Blocked writer: the old pair is still intact.
        assert_eq!(store.get(TokenKey::Access).unwrap().as_deref(), Some("old-a"));
        assert_eq!(store.get(TokenKey::Refresh).unwrap().as_deref(), Some("old-r"));

        lock.unlock().unwrap();
        handle.join().unwrap().unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "access": "new-a", "refresh": "new-r" })
        );
    }

    #[test]
    fn clear_waits_for_the_store_lock() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKey::Access, "a").unwrap();

        let lock = hold_lock(&store);
        let clearer = store.clone();
        let handle = thread::spawn(move || clearer.clear());
        thread::sleep(Duration::from_millis(50));

        assert!(store.path().exists());

        lock.unlock().unwrap();
        handle.join().unwrap().unwrap();
        assert!(!store.path().exists());
    }
}
