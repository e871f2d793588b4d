use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StorageCall {
    Load(String),
    Save(String, String),
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, String>,
    calls: Vec<StorageCall>,
    fail_writes: bool,
}

/// In-memory fake. Clones share state, so a test can keep a handle after
/// moving one into a `Wallet`.
#[derive(Clone, Default)]
pub(crate) struct MemoryStorage {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStorage {
    pub(crate) fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    pub(crate) fn value(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    pub(crate) fn calls(&self) -> Vec<StorageCall> {
        self.inner.borrow().calls.clone()
    }

    pub(crate) fn save_count(&self) -> usize {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, StorageCall::Save(..)))
            .count()
    }

    pub(crate) fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(StorageCall::Load(key.to_string()));
        Ok(inner.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner
            .calls
            .push(StorageCall::Save(key.to_string(), value.to_string()));
        if inner.fail_writes {
            anyhow::bail!("write to '{key}' rejected");
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
