//! Bookshelf 领域层（bookshelf-domain）
//!
//! 提供领域建模的通用构件与请求级领域事件机制：
//! - 实体（`entity`）、值对象（`value_object`）、规约（`specification`）与仓储接口（`repository`）；
//! - 领域事件契约（`domain_event`）：处理器签名与参数约束；
//! - 请求级事件子系统（`eventing`）：注册表、校验器、事件上下文与 task-local 作用域；
//! - 有序 ID 生成器（`snowflake`）。
//!
//! 本 crate 不依赖任何存储或传输实现，仓储接口与事务边界由应用层与基础设施层提供。
//!
//! 典型用法：
//! 1. 为事件处理器实现 `EventContract`，在启动时注册到 `EventRegistry`；
//! 2. 在请求入口用 `EventScope::run` 包裹处理流程；
//! 3. 领域逻辑中调用 `EventScope::store` 暂存事件；
//! 4. 用例成功（且事务提交）后调用 `EventScope::publish` 并发执行处理器。
//!
pub mod domain_event;
pub mod entity;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod repository;
pub mod snowflake;
pub mod specification;
pub mod value_object;
