//! # Preference Store
//!
//! String-keyed storage of JSON scalar text, the same shape as browser
//! `localStorage`. Every `set` is persisted immediately; there is no batching.
//!
//! ## Stores
//! - [`MemoryStore`] - In-process map (tests, hosts without storage)
//! - [`YamlFileStore`] - Map persisted to a YAML file on every write
//!
//! ## Typed Access
//! [`read_or`] decodes a stored value and falls back to a default when the key
//! is absent or the value is unparsable. Failures are logged, never returned.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Known preference keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    Volume,
    Octave,
    BeatCount,
    DrumEnabled,
    BeatStyle,
    Tempo,
    DarkTheme,
}

impl PrefKey {
    pub const ALL: [PrefKey; 7] = [
        PrefKey::Volume,
        PrefKey::Octave,
        PrefKey::BeatCount,
        PrefKey::DrumEnabled,
        PrefKey::BeatStyle,
        PrefKey::Tempo,
        PrefKey::DarkTheme,
    ];

    /// Storage key name.
    pub fn as_str(self) -> &'static str {
        match self {
            PrefKey::Volume => "currentVolume",
            PrefKey::Octave => "octave",
            PrefKey::BeatCount => "beatCount",
            PrefKey::DrumEnabled => "drumEnabled",
            PrefKey::BeatStyle => "selectedBeatStyle",
            PrefKey::Tempo => "tempo",
            PrefKey::DarkTheme => "darkTheme",
        }
    }
}

/// Key-value storage backend
pub trait PreferenceStore {
    /// Raw stored text, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store raw text, persisting immediately.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Read and decode a preference, substituting `default` on any failure.
pub fn read_or<S, T>(store: &S, key: PrefKey, default: T) -> T
where
    S: PreferenceStore + ?Sized,
    T: DeserializeOwned,
{
    match try_read(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("Preference '{}' not set, using default", key.as_str());
            default
        }
        Err(e) => {
            warn!("Ignoring stored preference '{}': {}", key.as_str(), e);
            default
        }
    }
}

fn try_read<S, T>(store: &S, key: PrefKey) -> Result<Option<T>, StorageError>
where
    S: PreferenceStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key.as_str())? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Value {
            key: key.as_str().to_string(),
            source,
        })
}

/// Encode and store a preference.
pub fn write<S, T>(store: &mut S, key: PrefKey, value: &T) -> Result<(), StorageError>
where
    S: PreferenceStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Value {
        key: key.as_str().to_string(),
        source,
    })?;
    store.set(key.as_str(), raw)
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// YAML-file-backed store
///
/// The file holds a flat map of key to JSON scalar text:
/// ```yaml
/// currentVolume: '0.6'
/// octave: '3'
/// drumEnabled: 'false'
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl YamlFileStore {
    /// Open a store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_yaml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// Open a store, falling back to an empty one if the file is unreadable.
    ///
    /// The file is left untouched until the first write.
    pub fn open_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::open(path).unwrap_or_else(|e| {
            warn!("Could not read preferences from {}: {}", path.display(), e);
            Self {
                path: path.to_path_buf(),
                values: BTreeMap::new(),
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let yaml = serde_yaml::to_string(&self.values)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }
}

impl PreferenceStore for YamlFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_defaults_when_absent() {
        let store = MemoryStore::new();
        assert_eq!(read_or(&store, PrefKey::Tempo, 100u16), 100);
        assert!(!read_or(&store, PrefKey::DarkTheme, false));
    }

    #[test]
    fn test_read_defaults_when_malformed() {
        let mut store = MemoryStore::new();
        store.set("octave", "not json".to_string()).unwrap();
        store.set("drumEnabled", "\"yes\"".to_string()).unwrap();
        assert_eq!(read_or(&store, PrefKey::Octave, 4i64), 4);
        assert!(read_or(&store, PrefKey::DrumEnabled, true));
    }

    #[test]
    fn test_write_then_read() {
        let mut store = MemoryStore::new();
        write(&mut store, PrefKey::Volume, &0.25f32).unwrap();
        write(&mut store, PrefKey::DrumEnabled, &false).unwrap();
        assert_eq!(store.get("currentVolume").unwrap().as_deref(), Some("0.25"));
        assert_eq!(read_or(&store, PrefKey::Volume, 1.0f64), 0.25);
        assert!(!read_or(&store, PrefKey::DrumEnabled, true));
    }

    #[test]
    fn test_yaml_store_persists_each_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("chordplay.yaml");

        let mut store = YamlFileStore::open(&path).unwrap();
        write(&mut store, PrefKey::Tempo, &132u16).unwrap();
        assert!(path.exists());

        let reopened = YamlFileStore::open(&path).unwrap();
        assert_eq!(read_or(&reopened, PrefKey::Tempo, 100u16), 132);
    }

    #[test]
    fn test_yaml_store_rejects_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chordplay.yaml");
        fs::write(&path, "- just\n- a list\n").unwrap();

        assert!(matches!(YamlFileStore::open(&path), Err(StorageError::Yaml(_))));
        let store = YamlFileStore::open_or_empty(&path);
        assert_eq!(store.get("tempo").unwrap(), None);
    }

    #[test]
    fn test_key_names() {
        let names: Vec<&str> = PrefKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["currentVolume", "octave", "beatCount", "drumEnabled", "selectedBeatStyle", "tempo", "darkTheme"]
        );
    }
}
