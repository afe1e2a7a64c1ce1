//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::services::{AccountStore, DEFAULT_STORAGE_KEY};
use crate::traits::{IdGenerator, InMemoryStorage, KeyValueStorage};
use crate::types::Account;

// ===== MockStorage =====

pub struct MockStorage {
    inner: InMemoryStorage,
    writes: AtomicUsize,
    /// 如果 Some，get 时返回此错误
    get_error: RwLock<Option<String>>,
    /// 如果 Some，set 时返回此错误
    set_error: RwLock<Option<String>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStorage::new(),
            writes: AtomicUsize::new(0),
            get_error: RwLock::new(None),
            set_error: RwLock::new(None),
        }
    }

    pub fn with_raw(raw: &str) -> Self {
        let storage = Self::new();
        storage.inner.set(DEFAULT_STORAGE_KEY, raw).unwrap();
        storage
    }

    pub fn set_get_error(&self, err: Option<String>) {
        *self.get_error.write().unwrap() = err;
    }

    pub fn set_set_error(&self, err: Option<String>) {
        *self.set_error.write().unwrap() = err;
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self) -> Option<String> {
        self.inner.get(DEFAULT_STORAGE_KEY).unwrap()
    }

    /// Decode the persisted slot the way a fresh store would
    pub fn stored_accounts(&self) -> Vec<Account> {
        serde_json::from_str(&self.raw().unwrap()).unwrap()
    }
}

impl KeyValueStorage for MockStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        if let Some(ref msg) = *self.get_error.read().unwrap() {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        if let Some(ref msg) = *self.set_error.read().unwrap() {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.inner.remove(key)
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ===== SequentialIdGenerator =====

/// Produces `acc-1`, `acc-2`, ...
pub struct SequentialIdGenerator {
    next: AtomicUsize,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicUsize::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        format!("acc-{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `AccountStore`
pub fn create_test_store() -> (AccountStore, Arc<MockStorage>) {
    create_test_store_with(MockStorage::new())
}

/// 使用指定存储创建测试用 `AccountStore`
pub fn create_test_store_with(storage: MockStorage) -> (AccountStore, Arc<MockStorage>) {
    let storage = Arc::new(storage);
    let store = AccountStore::new(storage.clone())
        .with_id_generator(Arc::new(SequentialIdGenerator::new()));
    (store, storage)
}
