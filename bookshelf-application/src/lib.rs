//! Bookshelf 应用层（bookshelf-application）
//!
//! 定义用例（`UseCase` / `TransactionalUseCase`）、工作单元（`UnitOfWork`）
//! 以及把二者与请求级事件分发组合起来的装饰器。
//!
//! 组合顺序固定为“先提交、后发布”：
//! `EventDispatched<Transactional<U, F>>`，由 [`commit_then_publish`] 构造。
//! 反向嵌套无法通过类型检查。
//!
pub mod decorator;
pub mod error;
pub mod unit_of_work;
pub mod use_case;

pub use decorator::{
    EventDispatched, TransactionMode, Transactional, commit_then_publish, publish_after,
    read_only, transactional,
};
pub use error::AppError;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};
pub use use_case::{TransactionalUseCase, UseCase};
