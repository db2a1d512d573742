//! Authorization entries and the in-memory store document.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::generator::normalize_id;

/// One issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(alias = "prenom")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: NaiveDateTime,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Accepts naive ISO-8601 stamps, RFC 3339 stamps with an offset (kept as
/// their local wall-clock time) and bare dates.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_created_at(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognized created_at timestamp {value:?}"))
    })
}

fn parse_created_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_local());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

impl Entry {
    pub fn new(id: String, name: &str, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            created_at,
            active: true,
        }
    }
}

/// All issued entries keyed by ID, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    entries: IndexMap<String, Entry>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry under its canonical (uppercase) ID. Returns it back
    /// if that ID is already taken.
    pub fn insert(&mut self, mut entry: Entry) -> Result<(), Entry> {
        entry.id = normalize_id(&entry.id);
        if self.entries.contains_key(&entry.id) {
            return Err(entry);
        }
        self.entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    /// Removes the entry for `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        self.entries.shift_remove(&normalize_id(id))
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// IDs of active entries, in insertion order.
    pub fn active_ids(&self) -> Vec<String> {
        self.entries
            .values()
            .filter(|entry| entry.active)
            .map(|entry| entry.id.clone())
            .collect()
    }
}

/// On-disk layout: an ordered entry list plus an ID lookup object.
///
/// Both fields are written from the same [`Store`], and on read they must
/// describe the same set of entries.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoreDocument {
    #[serde(alias = "ids", default)]
    pub entries: Vec<Entry>,
    #[serde(alias = "metadata", default)]
    pub index: IndexMap<String, Entry>,
}

impl From<&Store> for StoreDocument {
    fn from(store: &Store) -> Self {
        Self {
            entries: store.entries.values().cloned().collect(),
            index: store.entries.clone(),
        }
    }
}

impl TryFrom<StoreDocument> for Store {
    type Error = String;

    /// Rebuilds the store from both halves of the document.
    ///
    /// Repeated IDs in the entry list (written by releases that did not
    /// check for collisions) collapse into one entry holding the index
    /// record for that ID.
    fn try_from(document: StoreDocument) -> Result<Self, Self::Error> {
        let index: IndexMap<String, Entry> = document
            .index
            .into_iter()
            .map(|(id, mut entry)| {
                entry.id = normalize_id(&entry.id);
                (normalize_id(&id), entry)
            })
            .collect();

        let mut store = Store::new();
        let mut merged = Vec::new();
        for entry in document.entries {
            let Err(duplicate) = store.insert(entry) else {
                continue;
            };
            let Some(indexed) = index.get(&duplicate.id) else {
                return Err(format!(
                    "duplicate entry for ID {} with no index record",
                    duplicate.id
                ));
            };
            warn!(id = %duplicate.id, "Merging repeated entries for the same ID");
            store.entries.insert(duplicate.id.clone(), indexed.clone());
            merged.push(duplicate.id);
        }

        if index.len() != store.len() {
            return Err(format!(
                "index holds {} IDs but the entry list holds {}",
                index.len(),
                store.len()
            ));
        }
        for (id, indexed) in &index {
            match store.entries.get(id) {
                Some(entry) if entry == indexed || merged.contains(id) => {}
                Some(_) => return Err(format!("index record for {id} differs from its entry")),
                None => return Err(format!("index references unknown ID {id}")),
            }
        }

        Ok(store)
    }
}
