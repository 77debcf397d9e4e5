use redisstore::StoreError;
use thiserror::Error;

/// map 适配器错误
#[derive(Debug, Error)]
pub enum MapError {
    /// 存储客户端的错误，原样透传
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 键在 SCAN 之后、GET 之前被删除（仅在 `VanishedKeyPolicy::Fail` 下出现）
    #[error("key {0:?} vanished between scan and read")]
    VanishedKey(String),
}

pub type MapResult<T> = Result<T, MapError>;
