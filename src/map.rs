//! Redis 键空间的 map 视图
//!
//! 每个操作都直接委托给存储客户端，适配器本身不持有任何状态。

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use redisstore::{KeyValueStore, ScanOptions, escape_pattern};
use tracing::{debug, warn};

use crate::error::{MapError, MapResult};
use crate::options::{MapOptions, VanishedKeyPolicy};
use crate::scan::{KeyPages, collect_keys};

/// 把远程键值存储当作 `String -> String` 的 map 使用
///
/// 所有方法都取 `&self`，同一个实例可以在多个线程间共享；
/// 并发安全由存储客户端保证。遍历类操作（`keys` / `values` / `entries`）
/// 不是原子的，遍历期间其他客户端的写入可能可见也可能不可见。
pub struct RedisMap {
    store: Arc<dyn KeyValueStore>,
    options: MapOptions,
}

impl RedisMap {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_options(store, MapOptions::default())
    }

    pub fn with_options(store: Arc<dyn KeyValueStore>, options: MapOptions) -> Self {
        Self { store, options }
    }

    /// 获取存储后端引用
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    fn store_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match &self.options.namespace {
            Some(ns) => Cow::Owned(format!("{}{}", ns, key)),
            None => Cow::Borrowed(key),
        }
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            pattern: self
                .options
                .namespace
                .as_deref()
                .map(|ns| format!("{}*", escape_pattern(ns))),
            count: self.options.scan_count,
        }
    }

    // ==================== 查询 ====================

    /// 键数量；未设置命名空间时为整个库的 DBSIZE
    pub fn len(&self) -> MapResult<usize> {
        match &self.options.namespace {
            None => Ok(self.store.dbsize()?),
            Some(_) => Ok(self.keys()?.len()),
        }
    }

    pub fn is_empty(&self) -> MapResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn contains_key(&self, key: &str) -> MapResult<bool> {
        Ok(self.store.exists(&self.store_key(key))?)
    }

    /// 是否存在某个值
    ///
    /// 需要遍历整个键空间并逐个 GET，代价与库大小成正比。
    pub fn contains_value(&self, value: &str) -> MapResult<bool> {
        Ok(self.values()?.iter().any(|v| v == value))
    }

    /// 不存在时返回 `None`
    pub fn get(&self, key: &str) -> MapResult<Option<String>> {
        Ok(self.store.get(&self.store_key(key))?)
    }

    // ==================== 修改 ====================

    /// 写入并返回旧值
    pub fn insert(&self, key: &str, value: &str) -> MapResult<Option<String>> {
        Ok(self.store.set(&self.store_key(key), value)?)
    }

    /// 删除并返回旧值，键不存在时什么也不做
    pub fn remove(&self, key: &str) -> MapResult<Option<String>> {
        Ok(self.store.getdel(&self.store_key(key))?)
    }

    /// 逐条写入，不保证原子性：中途失败时之前的条目保持已写入
    pub fn insert_all<I, K, V>(&self, entries: I) -> MapResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut applied = 0usize;
        for (key, value) in entries {
            if let Err(e) = self.store.set(&self.store_key(key.as_ref()), value.as_ref()) {
                warn!("insert_all stopped after {} entries: {}", applied, e);
                return Err(e.into());
            }
            applied += 1;
        }
        debug!(applied, "insert_all finished");
        Ok(())
    }

    /// 清空
    ///
    /// 未设置命名空间时执行 FLUSHALL，会删除库里的**所有**键，
    /// 包括不是通过本适配器写入的键。
    pub fn clear(&self) -> MapResult<()> {
        let Some(ns) = &self.options.namespace else {
            self.store.flushall()?;
            return Ok(());
        };

        let mut removed = 0usize;
        for page in KeyPages::new(self.store.as_ref(), self.scan_options(), None) {
            let page = page?;
            let keys: Vec<&str> = page.iter().map(String::as_str).collect();
            removed += self.store.del(&keys)?;
        }
        debug!(namespace = %ns, removed, "namespace cleared");
        Ok(())
    }

    // ==================== 遍历 ====================

    /// 惰性 SCAN 页序列；每次调用都从头开始一轮新的遍历
    pub fn pages(&self) -> KeyPages<'_> {
        KeyPages::new(
            self.store.as_ref(),
            self.scan_options(),
            self.options.namespace.as_deref(),
        )
    }

    /// 一轮完整遍历观察到的所有键
    pub fn keys(&self) -> MapResult<HashSet<String>> {
        collect_keys(self.pages())
    }

    /// 所有值，每个键一个
    pub fn values(&self) -> MapResult<Vec<String>> {
        let mut values = Vec::new();
        for key in self.keys()? {
            if let Some(value) = self.read_scanned(&key)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// 所有键值对
    pub fn entries(&self) -> MapResult<HashMap<String, String>> {
        let mut entries = HashMap::new();
        for key in self.keys()? {
            if let Some(value) = self.read_scanned(&key)? {
                entries.insert(key, value);
            }
        }
        Ok(entries)
    }

    /// 读取扫描到的键，按策略处理在此期间被删除的键
    fn read_scanned(&self, key: &str) -> MapResult<Option<String>> {
        if let Some(value) = self.get(key)? {
            return Ok(Some(value));
        }
        match self.options.vanished_keys {
            VanishedKeyPolicy::Skip => {
                warn!("Key {:?} vanished between scan and read, skipping", key);
                Ok(None)
            }
            VanishedKeyPolicy::Fail => Err(MapError::VanishedKey(key.to_string())),
        }
    }
}
