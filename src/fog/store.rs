use crate::fog::model::{Stroke, StrokeStore};
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Storage key for the current stroke schema. A schema change gets a new key
/// so older blobs are never misread.
pub const FOG_STORAGE_KEY: &str = "fog_v1";
pub const FOG_DATA_SUBDIR: &str = "fog_data";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key}: {needed} bytes, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage io error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Synchronous, best-effort byte storage addressed by key.
pub trait KeyValueStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

fn check_quota(key: &str, needed: usize, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(quota) if needed > quota => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
    quota: Option<usize>,
    write_count: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any write that would leave more than `quota` bytes stored.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn insert_raw(&mut self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(key.to_string(), bytes.into());
    }

    pub fn get_raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of write attempts, including rejected ones.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    fn used_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.write_count += 1;
        let needed = self.used_excluding(key) + key.len() + bytes.len();
        check_quota(key, needed, self.quota)?;
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota: None,
        }
    }

    /// Caps the size of a single stored blob.
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        check_quota(key, bytes.len(), self.quota)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, bytes).map_err(|source| StorageError::Io { path, source })
    }
}

pub fn data_dir_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(FOG_DATA_SUBDIR))
}

pub fn resolve_data_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    data_dir_from_exe_path(&exe_path)
}

/// JSON writes non-finite numbers as `null`, which would make the whole blob
/// unreadable, so such strokes are refused here.
pub fn encode_strokes(strokes: &[Stroke]) -> Result<Vec<u8>> {
    if let Some(index) = strokes.iter().position(|stroke| !stroke.is_drawable()) {
        return Err(anyhow!("fog stroke {index} is not drawable: {:?}", strokes[index]));
    }
    serde_json::to_vec(strokes).context("serialize fog strokes")
}

pub fn decode_strokes(bytes: &[u8]) -> Result<Vec<Stroke>> {
    serde_json::from_slice(bytes).context("deserialize fog strokes")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { bytes: usize },
    Failed { error: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Reads and writes the stroke history through a [`KeyValueStorage`].
/// Neither direction fails past this boundary.
#[derive(Debug, Clone)]
pub struct FogPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> FogPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, FOG_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn save(&mut self, store: &StrokeStore) -> SaveOutcome {
        let strokes: Vec<Stroke> = store
            .all()
            .iter()
            .copied()
            .filter(Stroke::is_drawable)
            .collect();
        let dropped = store.len() - strokes.len();
        if dropped > 0 {
            tracing::warn!(dropped, "skipping undrawable fog strokes on save");
        }

        let bytes = match encode_strokes(&strokes) {
            Ok(bytes) => bytes,
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(%error, "fog strokes could not be encoded");
                return SaveOutcome::Failed { error };
            }
        };

        match self.storage.write(&self.key, &bytes) {
            Ok(()) => {
                tracing::debug!(
                    key = %self.key,
                    strokes = strokes.len(),
                    bytes = bytes.len(),
                    "fog strokes saved"
                );
                SaveOutcome::Saved { bytes: bytes.len() }
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "fog save failed, keeping strokes in memory");
                SaveOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }

    pub fn load(&self) -> StrokeStore {
        let bytes = match self.storage.read(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved fog, starting fully hidden");
                return StrokeStore::new();
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "fog storage unreadable, starting fully hidden");
                return StrokeStore::new();
            }
        };

        match decode_strokes(&bytes) {
            Ok(strokes) => {
                tracing::debug!(key = %self.key, strokes = strokes.len(), "fog strokes loaded");
                StrokeStore::from_strokes(strokes)
            }
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(key = %self.key, %error, "discarding malformed fog data");
                StrokeStore::new()
            }
        }
    }
}
