//! Search result cache.
//!
//! A persistent mapping from query text to the links found for it. The whole
//! store is loaded when opened and rewritten after every successful `put`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::MAX_SEARCH_RESULTS;
use crate::error_handling::Error;

/// One cached query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub links: Vec<String>,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    entries: BTreeMap<String, CacheEntry>,
}

/// Query → links store, optionally backed by a JSON file.
#[derive(Debug)]
pub struct ResultCache {
    path: Option<PathBuf>,
    file: CacheFile,
}

impl ResultCache {
    /// Loads the cache at `path`.
    ///
    /// A missing file is an empty cache. A file that does not parse is logged
    /// and treated as empty; it is replaced on the next successful `put`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        let file = match fs::read(&path) {
            Ok(content) => match serde_json::from_slice(&content) {
                Ok(file) => file,
                Err(e) => {
                    warn!("Ignoring unreadable cache file {}: {e}", path.display());
                    CacheFile::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No cache file at {}, starting empty", path.display());
                CacheFile::default()
            }
            Err(e) => {
                return Err(Error::Cache(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        debug!("Loaded {} cached queries from {}", file.entries.len(), path.display());
        Ok(Self {
            path: Some(path),
            file,
        })
    }

    /// A cache that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            file: CacheFile::default(),
        }
    }

    /// The links stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.file.entries.get(key).map(|entry| entry.links.as_slice())
    }

    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.file.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.file.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }

    /// Stores `links` (at most `MAX_SEARCH_RESULTS`) for `key` and persists the cache.
    ///
    /// If persisting fails the previous value for `key` is restored, so the
    /// store never holds an entry that is not on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the file cannot be written.
    pub fn put(&mut self, key: &str, mut links: Vec<String>) -> Result<(), Error> {
        links.truncate(MAX_SEARCH_RESULTS);
        let entry = CacheEntry {
            links,
            cached_at: Utc::now(),
        };

        let previous = self.file.entries.insert(key.to_string(), entry);
        if let Err(e) = self.save() {
            match previous {
                Some(previous) => self.file.entries.insert(key.to_string(), previous),
                None => self.file.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Rewrites the whole file: written to a temporary file next to it, then renamed.
    fn save(&self) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let cache_error = |e: &dyn std::fmt::Display| {
            Error::Cache(format!("failed to write {}: {e}", path.display()))
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| cache_error(&e))?;

        let content = serde_json::to_string_pretty(&self.file).map_err(|e| cache_error(&e))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| cache_error(&e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| cache_error(&e))?;
        tmp.persist(path).map_err(|e| cache_error(&e.error))?;

        debug!("Saved {} cached queries to {}", self.file.entries.len(), path.display());
        Ok(())
    }
}
