//! Persistent client storage for the session (token, username, points).
//!
//! The file backend keeps a flat JSON object in `<base>/session.json` with
//! restricted permissions (0600). Tokens are never logged or displayed in full.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};

use crate::config::paths;

/// Keys persisted in client storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StorageKey {
    JwtToken,
    Username,
    UserPoints,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::JwtToken,
        StorageKey::Username,
        StorageKey::UserPoints,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::JwtToken => "jwt_token",
            StorageKey::Username => "username",
            StorageKey::UserPoints => "user_points",
        }
    }
}

/// Key/value storage shared between the UI loop and request tasks.
pub trait Storage: Send + Sync {
    fn get(&self, key: StorageKey) -> Option<String>;

    /// # Errors
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the removal cannot be persisted.
    fn remove(&self, key: StorageKey) -> Result<()>;

    /// Bearer token, ignoring empty values.
    fn token(&self) -> Option<String> {
        self.get(StorageKey::JwtToken).filter(|t| !t.is_empty())
    }
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Storage backed by a JSON file, rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStorage {
    /// Opens the session file under `HABITRACK_HOME`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open_default() -> Result<Self> {
        Self::open(paths::session_path())
    }

    /// Opens storage at `path`. A missing file is empty storage.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            if contents.trim().is_empty() {
                Entries::new()
            } else {
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse session from {}", path.display()))?
            }
        } else {
            Entries::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        let path = &self.path;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(entries).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: StorageKey) -> Option<String> {
        lock(&self.entries).get(key.as_str()).cloned()
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        entries.insert(key.as_str().to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        let mut entries = lock(&self.entries);
        if entries.remove(key.as_str()).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<Entries>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a token.
    pub fn with_token(token: &str) -> Self {
        let storage = Self::default();
        lock(&storage.entries).insert(StorageKey::JwtToken.as_str().to_string(), token.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: StorageKey) -> Option<String> {
        lock(&self.entries).get(key.as_str()).cloned()
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        lock(&self.entries).insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        lock(&self.entries).remove(key.as_str());
        Ok(())
    }
}

/// Masks a token for display, keeping only a short prefix.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 || !token.is_char_boundary(8) {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}
