//! redis-map - 以 map 接口访问 Redis 键空间
//!
//! [`RedisMap`] 把远程键值存储包装成 `String -> String` 的关联容器：
//! 点查询、写入、删除、批量写入、清空，以及基于 SCAN 游标的
//! 键 / 值 / 键值对遍历。存储句柄通过构造函数注入，可以是真实的
//! [`RedisClient`]，也可以是进程内的 [`MemoryStore`]。
//!
//! # 示例
//! ```rust
//! use std::sync::Arc;
//! use redis_map::{MemoryStore, RedisMap};
//!
//! let map = RedisMap::new(Arc::new(MemoryStore::new()));
//! assert_eq!(map.insert("key", "value").unwrap(), None);
//! assert_eq!(map.get("key").unwrap(), Some("value".to_string()));
//! assert!(map.keys().unwrap().contains("key"));
//! ```

pub mod error;
pub mod map;
pub mod options;
pub mod scan;

pub use error::{MapError, MapResult};
pub use map::RedisMap;
pub use options::{MapOptions, VanishedKeyPolicy};
pub use scan::KeyPages;

pub use redisstore::{
    KeyValueStore, MemoryStore, RedisClient, RedisConfig, ScanOptions, ScanPage, StoreError,
    StoreResult,
};
