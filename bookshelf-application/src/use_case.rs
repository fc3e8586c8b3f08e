use crate::error::AppError;
use crate::unit_of_work::UnitOfWork;
use async_trait::async_trait;

/// 用例：应用层对外暴露的一次业务调用
#[async_trait]
pub trait UseCase<I>: Send + Sync
where
    I: Send + 'static,
{
    /// 用例名称（用于日志）
    const NAME: &'static str;

    type Output: Send;

    async fn invoke(&self, input: I) -> Result<Self::Output, AppError>;
}

/// 需要在工作单元中执行的用例
///
/// 只描述业务主体，事务的开启、提交与回滚由 `Transactional` 负责；
/// 需要发布事件时，在主体内调用 `EventScope::store` 暂存即可。
#[async_trait]
pub trait TransactionalUseCase<I>: Send + Sync
where
    I: Send + 'static,
{
    const NAME: &'static str;

    type Uow: UnitOfWork;
    type Output: Send;

    async fn execute(&self, uow: &mut Self::Uow, input: I) -> Result<Self::Output, AppError>;
}
