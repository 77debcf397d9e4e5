//! 内存存储实现
//!
//! 键按哈希分布到固定数量的桶中，SCAN 游标即下一个待遍历的桶下标，
//! 语义与 Redis 一致：整个遍历期间一直存在的键恰好返回一次，
//! 遍历期间新增或删除的键可能出现也可能不出现。

use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

use crate::pattern::glob_match;
use crate::traits::{KeyValueStore, SENTINEL_CURSOR, ScanOptions, ScanPage, StoreError, StoreResult};

/// 默认桶数量
pub const DEFAULT_BUCKETS: usize = 64;

/// 未指定 COUNT 时每页检查的键数量（与 Redis 默认值一致）
pub const DEFAULT_SCAN_COUNT: usize = 10;

/// 内存存储实现
///
/// `Clone` 之后共享同一份数据，可以当作多个客户端连接到同一个库。
#[derive(Clone)]
pub struct MemoryStore {
    buckets: Arc<RwLock<Vec<HashMap<String, String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// 指定桶数量（至少为 1）
    pub fn with_buckets(count: usize) -> Self {
        let count = count.max(1);
        Self {
            buckets: Arc::new(RwLock::new(vec![HashMap::new(); count])),
        }
    }

    fn bucket_of(key: &str, count: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % count as u64) as usize
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let buckets = self.buckets.read();
        let idx = Self::bucket_of(key, buckets.len());
        Ok(buckets[idx].get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<Option<String>> {
        let mut buckets = self.buckets.write();
        let idx = Self::bucket_of(key, buckets.len());
        Ok(buckets[idx].insert(key.to_string(), value.to_string()))
    }

    fn getdel(&self, key: &str) -> StoreResult<Option<String>> {
        let mut buckets = self.buckets.write();
        let idx = Self::bucket_of(key, buckets.len());
        Ok(buckets[idx].remove(key))
    }

    fn del(&self, keys: &[&str]) -> StoreResult<usize> {
        let mut buckets = self.buckets.write();
        let count = buckets.len();
        let mut removed = 0;
        for key in keys {
            if buckets[Self::bucket_of(key, count)].remove(*key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        let buckets = self.buckets.read();
        let idx = Self::bucket_of(key, buckets.len());
        Ok(buckets[idx].contains_key(key))
    }

    fn dbsize(&self) -> StoreResult<usize> {
        Ok(self.buckets.read().iter().map(HashMap::len).sum())
    }

    fn flushall(&self) -> StoreResult<()> {
        for bucket in self.buckets.write().iter_mut() {
            bucket.clear();
        }
        Ok(())
    }

    fn scan(&self, cursor: u64, options: &ScanOptions) -> StoreResult<ScanPage> {
        let buckets = self.buckets.read();
        let mut index = usize::try_from(cursor)
            .ok()
            .filter(|idx| *idx < buckets.len())
            .ok_or_else(|| StoreError::Internal(format!("invalid cursor {}", cursor)))?;

        let count = options.count.unwrap_or(DEFAULT_SCAN_COUNT).max(1);
        let mut examined = 0;
        let mut keys = Vec::new();

        while index < buckets.len() && examined < count {
            let bucket = &buckets[index];
            examined += bucket.len();
            keys.extend(
                bucket
                    .keys()
                    .filter(|k| options.pattern.as_deref().is_none_or(|p| glob_match(p, k)))
                    .cloned(),
            );
            index += 1;
        }

        let next = if index >= buckets.len() {
            SENTINEL_CURSOR
        } else {
            index as u64
        };
        debug!(cursor, next, returned = keys.len(), "memory scan");
        Ok(ScanPage { cursor: next, keys })
    }
}
