//! Key/value persistence for the tournament cache and the liked set.
//!
//! Two keys exist: `tournaments` (the last successful fetch) and
//! `likedTournaments` (a JSON array of ids). A missing key is "no cache",
//! not an error.

use crate::{ApiError, ApiResult, LikedSet, Tournament};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const TOURNAMENTS_KEY: &str = "tournaments";
pub const LIKED_KEY: &str = "likedTournaments";
pub const ENV_DATA_DIR: &str = "TOURCAL_DATA_DIR";

/// Storage for the last fetched tournaments and the liked ids.
///
/// Every method may fail with [`ApiError::CacheUnavailable`]; callers log
/// these and carry on.
pub trait TournamentStore: Send + Sync {
    fn load_cached_tournaments(&self) -> ApiResult<Option<Vec<Tournament>>>;
    fn save_tournaments(&self, tournaments: &[Tournament]) -> ApiResult<()>;
    fn load_liked_ids(&self) -> ApiResult<LikedSet>;
    fn save_liked_ids(&self, liked: &LikedSet) -> ApiResult<()>;
}

/// Blob store over a backend that only knows string keys and values.
trait BlobStore {
    fn read(&self, key: &str) -> ApiResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> ApiResult<()>;
}

fn load_json<T: serde::de::DeserializeOwned>(store: &impl BlobStore, key: &str) -> ApiResult<Option<T>> {
    let Some(raw) = store.read(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| ApiError::CacheUnavailable(format!("{key}: invalid json: {e}")))
}

fn save_json<T: serde::Serialize + ?Sized>(store: &impl BlobStore, key: &str, value: &T) -> ApiResult<()> {
    let raw = serde_json::to_string(value)
        .map_err(|e| ApiError::CacheUnavailable(format!("{key}: serialize failed: {e}")))?;
    store.write(key, &raw)
}

// ---------------------------------------------------------------------------
// File-backed store: one JSON file per key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the default data directory (see [`default_data_dir`]).
    pub fn from_env() -> Self {
        Self::new(default_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for JsonFileStore {
    fn read(&self, key: &str) -> ApiResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::CacheUnavailable(format!("read {} failed: {e}", path.display()))),
        }
    }

    fn write(&self, key: &str, value: &str) -> ApiResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::CacheUnavailable(format!("create dir {} failed: {e}", self.dir.display()))
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| ApiError::CacheUnavailable(format!("write {} failed: {e}", path.display())))
    }
}

impl TournamentStore for JsonFileStore {
    fn load_cached_tournaments(&self) -> ApiResult<Option<Vec<Tournament>>> {
        load_json(self, TOURNAMENTS_KEY)
    }

    fn save_tournaments(&self, tournaments: &[Tournament]) -> ApiResult<()> {
        save_json(self, TOURNAMENTS_KEY, tournaments)
    }

    fn load_liked_ids(&self) -> ApiResult<LikedSet> {
        Ok(load_json(self, LIKED_KEY)?.unwrap_or_default())
    }

    fn save_liked_ids(&self, liked: &LikedSet) -> ApiResult<()> {
        save_json(self, LIKED_KEY, liked)
    }
}

/// `$TOURCAL_DATA_DIR`, else `$XDG_CONFIG_HOME/tourcal`, else
/// `$HOME/.config/tourcal`, else the working directory.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("tourcal");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join("tourcal");
    }
    PathBuf::from(".")
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Process-local store. Values go through the same JSON encoding as the file
/// store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, for exercising the best-effort paths.
    pub fn failing_writes() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> ApiResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ApiError::CacheUnavailable("memory store poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> ApiResult<()> {
        if self.fail_writes {
            return Err(ApiError::CacheUnavailable(format!("{key}: store is read-only")));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ApiError::CacheUnavailable("memory store poisoned".into()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl TournamentStore for MemoryStore {
    fn load_cached_tournaments(&self) -> ApiResult<Option<Vec<Tournament>>> {
        load_json(self, TOURNAMENTS_KEY)
    }

    fn save_tournaments(&self, tournaments: &[Tournament]) -> ApiResult<()> {
        save_json(self, TOURNAMENTS_KEY, tournaments)
    }

    fn load_liked_ids(&self) -> ApiResult<LikedSet> {
        Ok(load_json(self, LIKED_KEY)?.unwrap_or_default())
    }

    fn save_liked_ids(&self, liked: &LikedSet) -> ApiResult<()> {
        save_json(self, LIKED_KEY, liked)
    }
}
