//! 基于游标的键空间遍历
//!
//! 从哨兵游标开始反复调用 SCAN，直到服务器再次返回哨兵游标。
//! 每次调用 [`RedisMap::pages`](crate::RedisMap::pages) 都会开始新的一轮遍历，
//! 中途不能恢复。遍历不是快照：页与页之间可能出现重复的键，
//! 所以汇总时必须去重。

use std::collections::HashSet;
use std::iter::FusedIterator;

use redisstore::{KeyValueStore, SENTINEL_CURSOR, ScanOptions};
use tracing::debug;

use crate::error::MapResult;

/// 惰性的 SCAN 页序列
pub struct KeyPages<'a> {
    store: &'a dyn KeyValueStore,
    options: ScanOptions,
    /// 需要从返回的键上去掉的前缀
    strip: Option<&'a str>,
    cursor: u64,
    done: bool,
    fetched: usize,
}

impl<'a> KeyPages<'a> {
    pub(crate) fn new(
        store: &'a dyn KeyValueStore,
        options: ScanOptions,
        strip: Option<&'a str>,
    ) -> Self {
        Self {
            store,
            options,
            strip,
            cursor: SENTINEL_CURSOR,
            done: false,
            fetched: 0,
        }
    }

    /// 已经取回的页数
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }

    fn strip_keys(&self, keys: Vec<String>) -> Vec<String> {
        match self.strip {
            None => keys,
            // 不带前缀的键不属于本命名空间（存储可能忽略了 MATCH）
            Some(prefix) => keys
                .into_iter()
                .filter_map(|k| k.strip_prefix(prefix).map(str::to_string))
                .collect(),
        }
    }
}

impl Iterator for KeyPages<'_> {
    type Item = MapResult<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.store.scan(self.cursor, &self.options) {
            Ok(page) => {
                self.fetched += 1;
                debug!(
                    page = self.fetched,
                    cursor = self.cursor,
                    next = page.cursor,
                    keys = page.keys.len(),
                    "scan page"
                );
                self.done = page.is_last();
                self.cursor = page.cursor;
                Some(Ok(self.strip_keys(page.keys)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

impl FusedIterator for KeyPages<'_> {}

/// 跑完一整轮遍历，把所有页合并成去重后的键集合
pub fn collect_keys(pages: KeyPages<'_>) -> MapResult<HashSet<String>> {
    let mut keys = HashSet::new();
    for page in pages {
        keys.extend(page?);
    }
    Ok(keys)
}
