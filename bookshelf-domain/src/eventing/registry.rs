use crate::domain_event::{EventContract, HandlerSignature};
use std::collections::HashMap;

/// 已知事件类型的注册表
///
/// 集合在启动时一次性构建，之后只读共享（通常包在 `Arc` 中）。
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    kinds: HashMap<&'static str, HandlerSignature>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册事件类型（链式调用）
    pub fn register<E: EventContract>(mut self) -> Self {
        if self.kinds.insert(E::NAME, E::SIGNATURE).is_some() {
            tracing::warn!(event = E::NAME, "event kind registered twice, keeping the latest signature");
        }
        self
    }

    pub fn signature(&self, kind: &str) -> Option<HandlerSignature> {
        self.kinds.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
