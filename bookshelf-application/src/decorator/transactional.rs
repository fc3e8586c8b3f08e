use crate::error::AppError;
use crate::unit_of_work::{UnitOfWork, UnitOfWorkFactory};
use crate::use_case::{TransactionalUseCase, UseCase};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionMode {
    #[default]
    ReadWrite,
    ReadOnly,
}

/// 事务装饰器
///
/// 每次调用从工作单元工厂创建新会话：`begin` → 执行主体 → 成功则 `commit`，
/// 失败则 `rollback` 并返回原始错误。只读模式下总是以 `rollback` 结束。
/// 回滚本身失败只记录日志，不会覆盖原始错误。
pub struct Transactional<U, F> {
    inner: U,
    factory: F,
    mode: TransactionMode,
}

impl<U, F> Transactional<U, F> {
    pub fn new(inner: U, factory: F, mode: TransactionMode) -> Self {
        Self {
            inner,
            factory,
            mode,
        }
    }

    pub fn inner(&self) -> &U {
        &self.inner
    }

    pub fn mode(&self) -> TransactionMode {
        self.mode
    }
}

#[async_trait]
impl<I, U, F> UseCase<I> for Transactional<U, F>
where
    I: Send + 'static,
    U: TransactionalUseCase<I>,
    F: UnitOfWorkFactory<Uow = U::Uow>,
{
    const NAME: &'static str = U::NAME;

    type Output = U::Output;

    async fn invoke(&self, input: I) -> Result<Self::Output, AppError> {
        let mut uow = self.factory.create();
        uow.begin().await?;
        tracing::debug!(use_case = U::NAME, mode = ?self.mode, "transaction begun");

        let output = match self.inner.execute(&mut uow, input).await {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(use_case = U::NAME, error = %err, "use case failed, rolling back");
                rollback_quietly(&mut uow, U::NAME).await;
                return Err(err);
            }
        };

        match self.mode {
            TransactionMode::ReadOnly => {
                rollback_quietly(&mut uow, U::NAME).await;
            }
            TransactionMode::ReadWrite => {
                if let Err(err) = uow.commit().await {
                    tracing::warn!(use_case = U::NAME, error = %err, "commit failed");
                    rollback_quietly(&mut uow, U::NAME).await;
                    return Err(err);
                }
                tracing::debug!(use_case = U::NAME, "transaction committed");
            }
        }

        Ok(output)
    }
}

async fn rollback_quietly<W: UnitOfWork>(uow: &mut W, use_case: &'static str) {
    if let Err(err) = uow.rollback().await {
        tracing::error!(use_case, error = %err, "rollback failed");
    }
}
