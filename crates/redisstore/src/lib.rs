//! Redis 存储抽象层
//!
//! 定义 map 适配器所依赖的存储客户端 trait，并提供两种实现：
//! - [`MemoryStore`]: 进程内存储，SCAN 语义与 Redis 一致，用于测试和嵌入
//! - [`RedisClient`]: 通过 redis crate 连接真实的 Redis 服务器
//!
//! # 支持的命令
//! - String: GET, SET (返回旧值), GETDEL
//! - 通用: DEL, EXISTS, DBSIZE, FLUSHALL, SCAN
//!
//! # 示例
//! ```rust
//! use redisstore::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("key", "value").unwrap();
//! assert_eq!(store.get("key").unwrap(), Some("value".to_string()));
//! ```

mod client;
mod config;
mod memory;
mod pattern;
mod traits;

pub use client::RedisClient;
pub use config::{REDIS_URL_ENV, RedisConfig};
pub use memory::{DEFAULT_BUCKETS, DEFAULT_SCAN_COUNT, MemoryStore};
pub use pattern::{escape_pattern, glob_match};
pub use traits::{KeyValueStore, SENTINEL_CURSOR, ScanOptions, ScanPage, StoreError, StoreResult};
