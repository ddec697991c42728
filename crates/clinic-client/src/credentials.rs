//! # Credential Persistence
//!
//! Two opaque tokens keyed `access` / `refresh`, stored in durable
//! client-side key-value storage and cleared wholesale on logout or
//! unrecoverable authentication failure.
//!
//! [`CredentialStore`] abstracts over the backend so the transport layer
//! and tests share one interface: [`MemoryCredentialStore`] for
//! ephemeral use, [`FileCredentialStore`] for the CLI's on-disk storage.
//!
//! Persistence failures in the file backend are logged and do not fail
//! the request that triggered the write — a token that only lives in
//! memory still serves the current process; the next start simply
//! re-authenticates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// An access/refresh token pair as issued by `POST login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived credential attached to API requests.
    pub access: String,
    /// Longer-lived credential used to mint a new access token.
    pub refresh: String,
}

/// Durable client-side storage for the credential pair.
///
/// Implementations are `Send + Sync` and shared behind an [`Arc`]: the
/// HTTP adapter reads on every request and writes on silent refresh,
/// while the session store writes on login and clears on logout.
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// The stored access token, if any.
    fn access(&self) -> Option<String>;

    /// The stored refresh token, if any.
    fn refresh(&self) -> Option<String>;

    /// Persist a freshly issued pair, replacing any previous tokens.
    fn store_pair(&self, tokens: TokenPair);

    /// Replace only the access token, as a silent refresh does.
    fn store_access(&self, access: String);

    /// Remove both tokens.
    fn clear(&self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

/// In-memory credential store for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<StoredTokens>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a pair, for tests.
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            inner: RwLock::new(StoredTokens {
                access: Some(tokens.access),
                refresh: Some(tokens.refresh),
            }),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access(&self) -> Option<String> {
        self.inner.read().access.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.inner.read().refresh.clone()
    }

    fn store_pair(&self, tokens: TokenPair) {
        *self.inner.write() = StoredTokens {
            access: Some(tokens.access),
            refresh: Some(tokens.refresh),
        };
    }

    fn store_access(&self, access: String) {
        self.inner.write().access = Some(access);
    }

    fn clear(&self) {
        *self.inner.write() = StoredTokens::default();
    }
}

/// File-backed credential store: a small JSON document holding the
/// `access`/`refresh` pair, readable only as far as filesystem
/// permissions allow.
///
/// The document is loaded once at [`FileCredentialStore::open`] and kept
/// in memory; every mutation rewrites the file (or removes it on
/// [`CredentialStore::clear`]).
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    cache: RwLock<StoredTokens>,
}

impl FileCredentialStore {
    /// Open the store at `path`, loading any previously persisted pair.
    /// A missing or unreadable document starts the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Arc<Self> {
        let path = path.into();
        let cache = RwLock::new(Self::load(&path));
        Arc::new(Self { path, cache })
    }

    fn load(path: &Path) -> StoredTokens {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(tokens) => tokens,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        "ignoring malformed credential file: {e}"
                    );
                    StoredTokens::default()
                }
            },
            Err(_) => StoredTokens::default(),
        }
    }

    fn persist(&self, tokens: &StoredTokens) {
        if tokens.access.is_none() && tokens.refresh.is_none() {
            if self.path.exists() {
                if let Err(e) = std::fs::remove_file(&self.path) {
                    tracing::warn!(path = %self.path.display(), "failed to remove credential file: {e}");
                }
            }
            return;
        }
        let serialized = match serde_json::to_string_pretty(tokens) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to serialize credentials: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!(path = %parent.display(), "failed to create credential directory: {e}");
                    return;
                }
            }
        }
        if let Err(e) = std::fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), "failed to persist credentials: {e}");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn access(&self) -> Option<String> {
        self.cache.read().access.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.cache.read().refresh.clone()
    }

    fn store_pair(&self, tokens: TokenPair) {
        let mut cache = self.cache.write();
        *cache = StoredTokens {
            access: Some(tokens.access),
            refresh: Some(tokens.refresh),
        };
        self.persist(&cache);
    }

    fn store_access(&self, access: String) {
        let mut cache = self.cache.write();
        cache.access = Some(access);
        self.persist(&cache);
    }

    fn clear(&self) {
        let mut cache = self.cache.write();
        *cache = StoredTokens::default();
        self.persist(&cache);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access: "acc-1".to_string(),
            refresh: "ref-1".to_string(),
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.access(), None);

        store.store_pair(pair());
        assert_eq!(store.access().as_deref(), Some("acc-1"));
        assert_eq!(store.refresh().as_deref(), Some("ref-1"));

        store.store_access("acc-2".to_string());
        assert_eq!(store.access().as_deref(), Some("acc-2"));
        assert_eq!(store.refresh().as_deref(), Some("ref-1"));

        store.clear();
        assert_eq!(store.access(), None);
        assert_eq!(store.refresh(), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");

        let store = FileCredentialStore::open(&path);
        store.store_pair(pair());
        drop(store);

        let reopened = FileCredentialStore::open(&path);
        assert_eq!(reopened.access().as_deref(), Some("acc-1"));
        assert_eq!(reopened.refresh().as_deref(), Some("ref-1"));
    }

    #[test]
    fn file_store_clear_removes_the_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");

        let store = FileCredentialStore::open(&path);
        store.store_pair(pair());
        assert!(path.exists());

        store.clear();
        assert!(!path.exists());

        let reopened = FileCredentialStore::open(&path);
        assert_eq!(reopened.access(), None);
    }

    #[test]
    fn malformed_document_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{not json").expect("write");

        let store = FileCredentialStore::open(&path);
        assert_eq!(store.access(), None);
        assert_eq!(store.refresh(), None);
    }
}
