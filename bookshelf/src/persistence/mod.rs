//! 内存持久化
//!
//! - `Table`：基于 `DashMap` 的已提交数据表，可声明唯一键；
//! - `InMemoryUnitOfWork`：单表会话，暂存变更并在提交时做乐观锁与唯一键检查；
//! - `InMemoryDatabase`：持有全部数据表与库级提交锁，为每张表提供会话工厂。
//!
mod database;
mod table;
mod uow;

pub use database::{InMemoryDatabase, SessionFactory};
pub use table::{Table, UniqueKey};
pub use uow::InMemoryUnitOfWork;
