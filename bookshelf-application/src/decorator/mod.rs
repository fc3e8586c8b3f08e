//! 用例装饰器
//!
//! - `Transactional`：把 `TransactionalUseCase` 包在工作单元中执行，成功提交、失败回滚；
//! - `EventDispatched`：内层调用成功后发布当前请求暂存的事件，失败时丢弃。
//!
//! 两种合法组合：
//! - 先提交后发布：`EventDispatched<Transactional<U, F>>`（[`commit_then_publish`]），
//!   处理器只会看到已提交的状态；
//! - 无事务直接发布：`EventDispatched<U>`（[`publish_after`]）。
//!
//! `Transactional` 只接受 `TransactionalUseCase`，而 `EventDispatched` 只产出 `UseCase`，
//! 因此“在未提交的事务内发布事件”无法被组合出来。
//!
mod dispatch;
mod transactional;

pub use dispatch::EventDispatched;
pub use transactional::{TransactionMode, Transactional};

/// 先提交后发布
pub fn commit_then_publish<U, F>(use_case: U, factory: F) -> EventDispatched<Transactional<U, F>> {
    EventDispatched::new(Transactional::new(use_case, factory, TransactionMode::ReadWrite))
}

/// 读写事务，不发布事件
pub fn transactional<U, F>(use_case: U, factory: F) -> Transactional<U, F> {
    Transactional::new(use_case, factory, TransactionMode::ReadWrite)
}

/// 只读事务：从不提交，结束时总是回滚
pub fn read_only<U, F>(use_case: U, factory: F) -> Transactional<U, F> {
    Transactional::new(use_case, factory, TransactionMode::ReadOnly)
}

/// 无事务，内层调用成功后直接发布
pub fn publish_after<U>(use_case: U) -> EventDispatched<U> {
    EventDispatched::new(use_case)
}
