//! 实体（Entity）基础抽象
//!
//! 为聚合与实体提供统一的标识（Id）与版本（optimistic locking）能力。
//!
use crate::value_object::Version;
use std::{fmt::Display, hash::Hash};

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Clone + Send + Sync + 'static {
    /// 实体标识类型，要求可哈希、可排序与可显示
    type Id: Clone + Eq + Ord + Hash + Display + Send + Sync + 'static;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于乐观锁与并发控制）
    fn version(&self) -> Version;

    /// 由仓储在提交成功后推进版本，领域代码不应直接调用
    fn set_version(&mut self, version: Version);
}
