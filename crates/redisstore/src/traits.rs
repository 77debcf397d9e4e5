//! 存储客户端 trait 定义
//!
//! 描述 map 适配器依赖的最小 Redis 命令集合

use std::sync::Arc;

use thiserror::Error;

/// 扫描游标的起始/结束哨兵值
pub const SENTINEL_CURSOR: u64 = 0;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// Redis 客户端返回的错误（连接、协议、命令错误）
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// 配置无效
    #[error("invalid configuration: {0}")]
    Config(String),

    /// 内部错误
    #[error("internal error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// SCAN 的可选参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// MATCH 模式（Redis glob 语法）
    pub pattern: Option<String>,
    /// COUNT 提示
    pub count: Option<usize>,
}

impl ScanOptions {
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// 一次 SCAN 的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// 下一次调用使用的游标，`SENTINEL_CURSOR` 表示遍历结束
    pub cursor: u64,
    pub keys: Vec<String>,
}

impl ScanPage {
    pub fn is_last(&self) -> bool {
        self.cursor == SENTINEL_CURSOR
    }
}

/// 键值存储客户端抽象
///
/// 所有方法都是同步阻塞调用；实现需要自己保证线程安全。
/// - String: GET, SET (返回旧值), GETDEL
/// - 通用: DEL, EXISTS, DBSIZE, FLUSHALL, SCAN
pub trait KeyValueStore: Send + Sync {
    /// GET: 获取字符串值
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// SET: 设置字符串值，返回旧值
    fn set(&self, key: &str, value: &str) -> StoreResult<Option<String>>;

    /// GETDEL: 读取并删除
    ///
    /// 默认实现先 GET，仅在键存在时再 DEL，两步之间不保证原子性。
    fn getdel(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self.get(key)?;
        if value.is_some() {
            self.del(&[key])?;
        }
        Ok(value)
    }

    /// DEL: 删除键，返回实际删除的数量
    fn del(&self, keys: &[&str]) -> StoreResult<usize>;

    /// EXISTS: 检查键是否存在
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// DBSIZE: 整个库的键数量
    fn dbsize(&self) -> StoreResult<usize>;

    /// FLUSHALL: 清空所有数据（不限于任何命名空间）
    fn flushall(&self) -> StoreResult<()>;

    /// SCAN: 从 `cursor` 开始取一页键
    fn scan(&self, cursor: u64, options: &ScanOptions) -> StoreResult<ScanPage>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<Option<String>> {
        (**self).set(key, value)
    }

    fn getdel(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).getdel(key)
    }

    fn del(&self, keys: &[&str]) -> StoreResult<usize> {
        (**self).del(keys)
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn dbsize(&self) -> StoreResult<usize> {
        (**self).dbsize()
    }

    fn flushall(&self) -> StoreResult<()> {
        (**self).flushall()
    }

    fn scan(&self, cursor: u64, options: &ScanOptions) -> StoreResult<ScanPage> {
        (**self).scan(cursor, options)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<Option<String>> {
        (**self).set(key, value)
    }

    fn getdel(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).getdel(key)
    }

    fn del(&self, keys: &[&str]) -> StoreResult<usize> {
        (**self).del(keys)
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn dbsize(&self) -> StoreResult<usize> {
        (**self).dbsize()
    }

    fn flushall(&self) -> StoreResult<()> {
        (**self).flushall()
    }

    fn scan(&self, cursor: u64, options: &ScanOptions) -> StoreResult<ScanPage> {
        (**self).scan(cursor, options)
    }
}
