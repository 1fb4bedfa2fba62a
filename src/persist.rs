use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

pub const SEARCH_QUERY_KEY: &str = "searchQuery";
pub const CURRENT_PAGE_KEY: &str = "currentPage";

/// Durable mirror of the live search state. Read once at startup, written
/// after every accepted change to the query or page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSearchState {
    pub search_query: String,
    pub current_page: u32,
}

impl Default for PersistedSearchState {
    fn default() -> Self {
        PersistedSearchState {
            search_query: String::new(),
            current_page: 1,
        }
    }
}

/// A per-session key-value string store.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a single JSON file of string keys and values.
///
/// A missing or unparseable file degrades to an empty session rather than
/// failing startup.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        FileSession { path, values }
    }
}

impl SessionStorage for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Read the persisted state, falling back to defaults for anything missing
/// or malformed.
pub fn load(storage: &dyn SessionStorage) -> PersistedSearchState {
    let search_query = storage.get(SEARCH_QUERY_KEY).unwrap_or_default();
    let current_page = storage
        .get(CURRENT_PAGE_KEY)
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1);

    PersistedSearchState {
        search_query,
        current_page,
    }
}

/// Mirror the state into storage.
///
/// Persistence is best-effort: a failed write only costs state recovery on
/// the next run, so callers may log and continue.
pub fn save(storage: &mut dyn SessionStorage, state: &PersistedSearchState) -> Result<()> {
    storage.set(SEARCH_QUERY_KEY, &state.search_query)?;
    storage.set(CURRENT_PAGE_KEY, &state.current_page.to_string())?;
    Ok(())
}

/// `save` for call sites that treat persistence as fire-and-forget.
pub fn save_best_effort(storage: &mut dyn SessionStorage, state: &PersistedSearchState) {
    if let Err(e) = save(storage, state) {
        warn!("failed to persist search state: {}", e);
    }
}
