//! Persistence of the anniversary as a single named value.
//!
//! The board itself never touches storage: the binary reads the anniversary
//! through a [`Store`] and hands the resulting [`Date`] to the board.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::date::{Date, DateParseError};

/// Key the anniversary is stored under.
pub const ANNIVERSARY_KEY: &str = "anniversary";

/// Anniversary used while none has been stored: 2025-05-12.
pub const DEFAULT_ANNIVERSARY: Date = Date::from_jdn(2460808);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access store `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse store `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to encode store")]
    Encode(#[from] toml::ser::Error),
    #[error("stored `{key}` is not a string")]
    NotAString { key: String },
    #[error("stored `{key}` is not a date")]
    InvalidDate {
        key: String,
        #[source]
        source: DateParseError,
    },
}

/// A string key-value store.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Reads the stored anniversary, or [`DEFAULT_ANNIVERSARY`] if none is stored.
///
/// # Example
///
/// ```
/// use anniversary::store::{self, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// assert_eq!("2025-05-12", store::load_anniversary(&store).unwrap().iso_gregorian());
///
/// store::save_anniversary(&mut store, "2024-02-29".parse().unwrap()).unwrap();
/// assert_eq!("2024-02-29", store::load_anniversary(&store).unwrap().iso_gregorian());
/// ```
pub fn load_anniversary<S: Store + ?Sized>(store: &S) -> Result<Date, StoreError> {
    match store.get(ANNIVERSARY_KEY)? {
        None => {
            debug!(default = %DEFAULT_ANNIVERSARY, "no anniversary stored");
            Ok(DEFAULT_ANNIVERSARY)
        }
        Some(value) => value.parse().map_err(|source| StoreError::InvalidDate {
            key: ANNIVERSARY_KEY.to_owned(),
            source,
        }),
    }
}

/// Replaces the stored anniversary.
pub fn save_anniversary<S: Store + ?Sized>(store: &mut S, date: Date) -> Result<(), StoreError> {
    store.set(ANNIVERSARY_KEY, &date.iso_gregorian())
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store backed by a TOML file of top-level string keys.
///
/// A missing file reads as empty. Writing keeps every other key in the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.read_table()?.remove(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(StoreError::NotAString {
                key: key.to_owned(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut table = self.read_table()?;
        table.insert(key.to_owned(), toml::Value::String(value.to_owned()));
        let text = toml::to_string(&table)?;
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(&self.path, text).map_err(io_err)?;
        debug!(path = %self.path.display(), key, value, "stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_anniversary() {
        assert_eq!(Date::from_gregorian(2025, 5, 12), Some(DEFAULT_ANNIVERSARY));
    }

    #[test]
    fn missing_file_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.toml"));
        assert_eq!(None, store.get(ANNIVERSARY_KEY).unwrap());
        assert_eq!(DEFAULT_ANNIVERSARY, load_anniversary(&store).unwrap());
    }

    #[test]
    fn file_round_trip_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/store.toml");
        let mut store = FileStore::new(&path);
        let date = Date::from_gregorian(2023, 12, 24).unwrap();
        save_anniversary(&mut store, date).unwrap();

        assert_eq!("anniversary = \"2023-12-24\"\n", fs::read_to_string(&path).unwrap());
        assert_eq!(date, load_anniversary(&FileStore::new(&path)).unwrap());
    }

    #[test]
    fn set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        fs::write(&path, "theme = \"pink\"\nanniversary = \"2020-01-01\"\n").unwrap();
        let mut store = FileStore::new(&path);
        save_anniversary(&mut store, Date::from_gregorian(2025, 5, 12).unwrap()).unwrap();

        assert_eq!(Some("pink".to_owned()), store.get("theme").unwrap());
        assert_eq!(DEFAULT_ANNIVERSARY, load_anniversary(&store).unwrap());
    }

    #[test]
    fn invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        let store = FileStore::new(&path);

        fs::write(&path, "anniversary = 20250512\n").unwrap();
        assert!(matches!(
            load_anniversary(&store),
            Err(StoreError::NotAString { .. })
        ));

        fs::write(&path, "anniversary = \"2025-02-30\"\n").unwrap();
        assert!(matches!(
            load_anniversary(&store),
            Err(StoreError::InvalidDate { .. })
        ));

        fs::write(&path, "anniversary = \n").unwrap();
        assert!(matches!(
            load_anniversary(&store),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(None, store.get("anniversary").unwrap());
        store.set("anniversary", "not a date").unwrap();
        assert!(matches!(
            load_anniversary(&store),
            Err(StoreError::InvalidDate { .. })
        ));
    }
}
