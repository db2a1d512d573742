//! File-backed record store.
//!
//! Every operation reads the whole file, works on the in-memory [`Store`],
//! and rewrites the whole file when something changed. Writes go through a
//! temporary file in the target directory that is renamed over the record
//! file, so an interrupted write leaves the previous contents intact.

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{IdError, Result};
use crate::generator::{Secret, generate_id_with_attempt, normalize_id};
use crate::models::{Entry, Store, StoreDocument};

/// Upper bound on collision retries for a single `add`.
pub const MAX_COLLISION_ATTEMPTS: u32 = 16;

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record file. A missing file is an empty store.
    pub fn load(&self) -> Result<Store> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Record file absent, starting empty");
                return Ok(Store::new());
            }
            Err(err) => return Err(IdError::io(&self.path, err)),
        };

        let document: StoreDocument =
            serde_json::from_str(&content).map_err(|err| IdError::corrupt(&self.path, err))?;
        let store = Store::try_from(document).map_err(|reason| IdError::corrupt(&self.path, reason))?;
        debug!(path = %self.path.display(), entries = store.len(), "Loaded record file");
        Ok(store)
    }

    /// Rewrite the record file with the full contents of `store`.
    pub fn save(&self, store: &Store) -> Result<()> {
        let mut json = serde_json::to_string_pretty(&StoreDocument::from(store))
            .map_err(|err| IdError::corrupt(&self.path, err))?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|err| IdError::io(&dir, err))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|err| IdError::io(&dir, err))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|err| IdError::io(tmp.path(), err))?;
        tmp.persist(&self.path)
            .map_err(|err| IdError::io(&self.path, err.error))?;

        debug!(path = %self.path.display(), entries = store.len(), "Saved record file");
        Ok(())
    }

    /// Mint a token for `name`, record it, and return the new entry.
    pub fn add(&self, secret: &Secret, name: &str) -> Result<Entry> {
        self.add_at(secret, name, Local::now().naive_local())
    }

    /// [`RecordStore::add`] with an explicit generation instant.
    pub fn add_at(&self, secret: &Secret, name: &str, at: NaiveDateTime) -> Result<Entry> {
        let mut store = self.load()?;

        for attempt in 0..MAX_COLLISION_ATTEMPTS {
            let id = generate_id_with_attempt(secret, name, at, attempt)?;
            let entry = Entry::new(id, name, at);
            if store.insert(entry.clone()).is_err() {
                debug!(attempt, "Generated ID already issued, retrying");
                continue;
            }

            self.save(&store)?;
            info!(id = %entry.id, "Issued new ID");
            return Ok(entry);
        }

        Err(IdError::Collision(name.trim().to_string()))
    }

    /// All entries in insertion order.
    pub fn list(&self) -> Result<Vec<Entry>> {
        Ok(self.load()?.entries().cloned().collect())
    }

    /// Remove the entry for `id` (case-insensitive). The file is only
    /// rewritten when an entry was actually removed.
    pub fn delete(&self, id: &str) -> Result<Entry> {
        let id = normalize_id(id);
        let mut store = self.load()?;

        let Some(removed) = store.remove(&id) else {
            return Err(IdError::NotFound(id));
        };
        self.save(&store)?;
        info!(id = %removed.id, "Deleted ID");
        Ok(removed)
    }

    /// Tokens of active entries, in insertion order.
    pub fn export_active(&self) -> Result<Vec<String>> {
        Ok(self.load()?.active_ids())
    }
}
