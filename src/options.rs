//! map 适配器选项

/// `values()` / `entries()` 遇到"扫描到但已被删除"的键时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VanishedKeyPolicy {
    /// 跳过该键
    #[default]
    Skip,
    /// 返回 `MapError::VanishedKey`
    Fail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapOptions {
    /// 键前缀。设置后所有键都以 `namespace + key` 存储，
    /// `len()` / `clear()` 只作用于该前缀下的键；
    /// 未设置时作用于整个库（DBSIZE / FLUSHALL）。
    pub namespace: Option<String>,
    /// 每次 SCAN 的 COUNT 提示
    pub scan_count: Option<usize>,
    pub vanished_keys: VanishedKeyPolicy,
}

impl MapOptions {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_scan_count(mut self, count: usize) -> Self {
        self.scan_count = Some(count);
        self
    }

    pub fn with_vanished_keys(mut self, policy: VanishedKeyPolicy) -> Self {
        self.vanished_keys = policy;
        self
    }
}
