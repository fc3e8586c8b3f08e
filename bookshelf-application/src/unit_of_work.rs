use crate::error::AppError;
use async_trait::async_trait;

/// 工作单元：独占一次用例调用期间的持久化会话
///
/// - `begin`：开启会话；
/// - `commit`：原子地应用全部暂存变更；
/// - `rollback`：丢弃全部暂存变更；
/// - `refresh`：丢弃暂存变更并重新读取已提交状态，事务保持开启。
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&mut self) -> Result<(), AppError>;

    async fn commit(&mut self) -> Result<(), AppError>;

    async fn rollback(&mut self) -> Result<(), AppError>;

    async fn refresh(&mut self) -> Result<(), AppError>;
}

/// 为每次调用创建全新的工作单元
pub trait UnitOfWorkFactory: Send + Sync {
    type Uow: UnitOfWork;

    fn create(&self) -> Self::Uow;
}

impl<F, W> UnitOfWorkFactory for F
where
    F: Fn() -> W + Send + Sync,
    W: UnitOfWork,
{
    type Uow = W;

    fn create(&self) -> W {
        self()
    }
}
