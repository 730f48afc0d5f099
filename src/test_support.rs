/// Test doubles for the host page and storage

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Result, WidgetError};
use crate::host::Host;
use crate::store::{MemoryStorage, StorageBackend};

pub struct FakeHost {
    url: RefCell<String>,
    title: RefCell<String>,
    pub pushed: RefCell<Vec<String>>,
    pub replaced: RefCell<Vec<String>>,
    pub popstates: Cell<usize>,
    pub confirm_answer: Cell<bool>,
    pub confirm_prompts: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new(url: &str, title: &str) -> Self {
        FakeHost {
            url: RefCell::new(url.to_string()),
            title: RefCell::new(title.to_string()),
            pushed: RefCell::new(Vec::new()),
            replaced: RefCell::new(Vec::new()),
            popstates: Cell::new(0),
            confirm_answer: Cell::new(true),
            confirm_prompts: RefCell::new(Vec::new()),
        }
    }

    /// Move the address bar without going through the widget
    pub fn set_url(&self, url: &str) {
        *self.url.borrow_mut() = url.to_string();
    }

    pub fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }
}

impl Host for FakeHost {
    fn current_url(&self) -> String {
        self.url.borrow().clone()
    }

    fn current_title(&self) -> String {
        self.title.borrow().clone()
    }

    fn push_state(&self, url: &str) {
        self.set_url(url);
        self.pushed.borrow_mut().push(url.to_string());
    }

    fn replace_state(&self, url: &str) {
        self.set_url(url);
        self.replaced.borrow_mut().push(url.to_string());
    }

    fn dispatch_popstate(&self) {
        self.popstates.set(self.popstates.get() + 1);
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirm_prompts.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }
}

/// Backend where every call fails, like a browser with storage disabled
pub struct FailingStorage;

impl StorageBackend for FailingStorage {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(WidgetError::StorageAccess("SecurityError: storage disabled".to_string()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(WidgetError::StorageAccess("SecurityError: storage disabled".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<()> {
        Err(WidgetError::StorageAccess("SecurityError: storage disabled".to_string()))
    }
}

/// Memory backend that counts writes and deletes. Clones share entries and
/// the counter.
#[derive(Clone, Default)]
pub struct CountingStorage {
    inner: MemoryStorage,
    writes: Rc<Cell<usize>>,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.inner.insert(key, value);
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for CountingStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.inner.write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.inner.delete(key)
    }
}
