//! 基于 redis crate 的存储客户端
//!
//! 持有一个同步连接，由互斥锁串行化访问。连接出现 IO 错误后会被丢弃，
//! 下一次调用时重新建立；出错的那次调用仍然把错误返回给调用方，不做重试。

use parking_lot::Mutex;
use redis::{Client, Connection, RedisError, RedisResult};
use tracing::{debug, info, warn};

use crate::config::RedisConfig;
use crate::traits::{KeyValueStore, ScanOptions, ScanPage, StoreError, StoreResult};

/// Redis 存储客户端
pub struct RedisClient {
    client: Client,
    config: RedisConfig,
    conn: Mutex<Option<Connection>>,
}

impl RedisClient {
    /// 按配置建立连接（立即连接一次以便尽早暴露配置错误）
    pub fn connect(config: RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.connection_info()?)?;
        let this = Self {
            client,
            config,
            conn: Mutex::new(None),
        };
        let conn = this.open_connection()?;
        *this.conn.lock() = Some(conn);
        Ok(this)
    }

    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    fn open_connection(&self) -> StoreResult<Connection> {
        let conn = self
            .client
            .get_connection_with_timeout(self.config.connect_timeout())?;
        let timeout = self.config.response_timeout();
        conn.set_read_timeout(timeout)?;
        conn.set_write_timeout(timeout)?;
        info!(
            "Connected to redis at {}:{} (db {})",
            self.config.host, self.config.port, self.config.database
        );
        Ok(conn)
    }

    /// 在共享连接上执行命令
    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> RedisResult<T>,
    ) -> StoreResult<T> {
        let mut guard = self.conn.lock();
        if guard.is_none() {
            *guard = Some(self.open_connection()?);
        }
        let Some(conn) = guard.as_mut() else {
            return Err(StoreError::Internal("connection unavailable".to_string()));
        };

        match f(conn) {
            Ok(value) => Ok(value),
            Err(e) => {
                if is_broken_connection(&e) {
                    warn!("Discarding redis connection after error: {}", e);
                    *guard = None;
                }
                Err(e.into())
            }
        }
    }
}

fn is_broken_connection(e: &RedisError) -> bool {
    e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal()
}

impl KeyValueStore for RedisClient {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.with_connection(|conn| redis::cmd("GET").arg(key).query(conn))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<Option<String>> {
        // SET ... GET 需要 Redis 6.2+
        self.with_connection(|conn| redis::cmd("SET").arg(key).arg(value).arg("GET").query(conn))
    }

    fn getdel(&self, key: &str) -> StoreResult<Option<String>> {
        self.with_connection(|conn| redis::cmd("GETDEL").arg(key).query(conn))
    }

    fn del(&self, keys: &[&str]) -> StoreResult<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("DEL");
        for key in keys {
            cmd.arg(*key);
        }
        self.with_connection(|conn| cmd.query(conn))
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        self.with_connection(|conn| redis::cmd("EXISTS").arg(key).query(conn))
    }

    fn dbsize(&self) -> StoreResult<usize> {
        self.with_connection(|conn| redis::cmd("DBSIZE").query(conn))
    }

    fn flushall(&self) -> StoreResult<()> {
        warn!("FLUSHALL on {}:{}", self.config.host, self.config.port);
        self.with_connection(|conn| redis::cmd("FLUSHALL").query(conn))
    }

    fn scan(&self, cursor: u64, options: &ScanOptions) -> StoreResult<ScanPage> {
        let mut cmd = redis::cmd("SCAN");
        cmd.arg(cursor);
        if let Some(pattern) = &options.pattern {
            cmd.arg("MATCH").arg(pattern);
        }
        if let Some(count) = options.count {
            cmd.arg("COUNT").arg(count);
        }

        let (next, keys): (u64, Vec<String>) = self.with_connection(|conn| cmd.query(conn))?;
        debug!(cursor, next, returned = keys.len(), "redis scan");
        Ok(ScanPage { cursor: next, keys })
    }
}
