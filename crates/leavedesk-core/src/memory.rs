//! In-memory session store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::Result;
use crate::traits::{SessionStore, TokenKey};

/// A [`SessionStore`] that lives only as long as the process.
///
/// Useful for tests and for short-lived tools that log in on every run.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<TokenKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a session.
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(TokenKey::Access, access.into());
        entries.insert(TokenKey::Refresh, refresh.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

// A poisoned lock still holds consistent data: every write is a single
// insert or remove.
impl SessionStore for MemoryStore {
    fn get(&self, key: TokenKey) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
        Ok(())
    }
}
