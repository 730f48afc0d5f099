/// Persistent MRU list of visited case pages

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::config::Config;
use crate::error::{Result, WidgetError};
use crate::record::{VisitedPageList, VisitedPageRecord};

/// Durable key-value storage the record list lives in
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory backend. Used when the browser has no usable localStorage,
/// and by tests. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Bounded, deduplicated, most-recently-touched-first record list.
///
/// The persisted value is the canonical list: every operation reads the full
/// list, computes the new one and writes it back in a single call. Storage
/// failures are logged and never reach the caller.
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    key: String,
    capacity: usize,
}

impl RecordStore {
    pub fn new(backend: Box<dyn StorageBackend>, config: &Config) -> Self {
        RecordStore {
            backend,
            key: config.storage_key.clone(),
            capacity: config.capacity.max(1),
        }
    }

    /// Current list; empty when nothing is stored or the stored value is unreadable
    pub fn load(&self) -> VisitedPageList {
        match self.try_load() {
            Ok(pages) => pages,
            Err(e) => {
                log::error!("Error reading {} from storage: {}", self.key, e);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<VisitedPageList> {
        let Some(raw) = self.backend.read(&self.key)? else {
            return Ok(Vec::new());
        };

        // A stored `null` reads as empty
        let pages: Option<VisitedPageList> = serde_json::from_str(&raw)?;
        Ok(self.normalize(pages.unwrap_or_default()))
    }

    /// Drop repeated ids (first one wins) and anything past capacity
    fn normalize(&self, pages: VisitedPageList) -> VisitedPageList {
        let mut seen = HashSet::new();
        pages
            .into_iter()
            .filter(|page| seen.insert(page.id.clone()))
            .take(self.capacity)
            .collect()
    }

    /// Persist the first `capacity` records, replacing whatever was stored.
    /// Returns whether the write went through.
    pub fn save(&self, pages: &[VisitedPageRecord]) -> bool {
        let kept = &pages[..pages.len().min(self.capacity)];

        let result = serde_json::to_string(kept)
            .map_err(WidgetError::from)
            .and_then(|json| self.backend.write(&self.key, &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save {}: {}", self.key, e);
                false
            }
        }
    }

    /// Insert a new record at the front, or refresh an existing one in place
    /// when its title changed. A revisit with the same title leaves both the
    /// record and its position alone.
    ///
    /// Returns whether a persisted mutation occurred.
    pub fn touch(&self, id: &str, url: &str, title: &str) -> bool {
        let mut pages = self.load();

        match pages.iter_mut().find(|page| page.id == id) {
            Some(page) => {
                if page.title == title {
                    return false;
                }
                page.url = url.to_string();
                page.title = title.to_string();
            }
            None => {
                pages.insert(0, VisitedPageRecord::new(id, url, title));
                pages.truncate(self.capacity);
            }
        }

        self.save(&pages)
    }

    /// Filter out the record with `id`. The list is written back even when
    /// nothing matched.
    pub fn remove(&self, id: &str) {
        let mut pages = self.load();
        pages.retain(|page| page.id != id);
        self.save(&pages);
    }

    /// Remove the stored list entirely
    pub fn clear(&self) {
        if let Err(e) = self.backend.delete(&self.key) {
            log::warn!("Failed to clear {}: {}", self.key, e);
        }
    }
}
