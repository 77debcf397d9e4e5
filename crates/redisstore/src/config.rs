//! Redis 连接配置

use redis::{ConnectionAddr, ConnectionInfo, IntoConnectionInfo};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::traits::{StoreError, StoreResult};

/// 读取连接地址的环境变量
pub const REDIS_URL_ENV: &str = "REDIS_URL";

/// Redis 连接配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    /// ACL 用户名（Redis 6+）
    pub username: Option<String>,
    pub password: Option<String>,
    /// 逻辑库编号
    pub database: i64,
    /// 建立连接的超时时间（毫秒）
    pub connect_timeout_ms: u64,
    /// 读写超时（毫秒），`None` 表示一直阻塞
    pub response_timeout_ms: Option<u64>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            username: None,
            password: None,
            database: 0,
            connect_timeout_ms: 5_000,
            response_timeout_ms: Some(5_000),
        }
    }
}

impl RedisConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// 从 `redis://[user[:password]@]host[:port][/db]` 解析
    pub fn from_url(url: &str) -> StoreResult<Self> {
        let info = url.into_connection_info()?;
        let (host, port) = match info.addr {
            ConnectionAddr::Tcp(host, port) => (host, port),
            other => {
                return Err(StoreError::Config(format!(
                    "unsupported address {:?}, only plain tcp is supported",
                    other
                )));
            }
        };

        Ok(Self {
            host,
            port,
            username: info.redis.username,
            password: info.redis.password,
            database: info.redis.db,
            ..Self::default()
        })
    }

    /// 读取 `REDIS_URL`，未设置时使用默认配置
    pub fn from_env() -> StoreResult<Self> {
        match std::env::var(REDIS_URL_ENV) {
            Ok(url) => Self::from_url(&url),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: impl Into<String>) -> Self {
        self.username = username;
        self.password = Some(password.into());
        self
    }

    pub fn with_database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout_ms.map(Duration::from_millis)
    }

    /// 转换为 redis 客户端使用的连接信息
    pub fn connection_info(&self) -> StoreResult<ConnectionInfo> {
        if self.host.is_empty() {
            return Err(StoreError::Config("host must not be empty".to_string()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(StoreError::Config(
                "connect_timeout_ms must be greater than zero".to_string(),
            ));
        }

        let mut info = format!("redis://{}:{}/{}", self.host, self.port, self.database)
            .as_str()
            .into_connection_info()?;
        info.redis.username = self.username.clone();
        info.redis.password = self.password.clone();
        Ok(info)
    }
}
