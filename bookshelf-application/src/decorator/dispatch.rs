use crate::error::AppError;
use crate::use_case::UseCase;
use async_trait::async_trait;
use bookshelf_domain::eventing::EventScope;

/// 事件分发装饰器
///
/// 内层调用成功后发布当前作用域中暂存的全部事件。内层失败时不发布，
/// 并清空整个作用域：同一请求中更早暂存、尚未发布的事件（包括其他用例暂存的）也一并丢弃。
pub struct EventDispatched<U> {
    inner: U,
}

impl<U> EventDispatched<U> {
    pub fn new(inner: U) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &U {
        &self.inner
    }
}

#[async_trait]
impl<I, U> UseCase<I> for EventDispatched<U>
where
    I: Send + 'static,
    U: UseCase<I>,
{
    const NAME: &'static str = U::NAME;

    type Output = U::Output;

    async fn invoke(&self, input: I) -> Result<Self::Output, AppError> {
        match self.inner.invoke(input).await {
            Ok(output) => {
                EventScope::publish().await?;
                Ok(output)
            }
            Err(err) => {
                match EventScope::clear() {
                    Ok(()) => {
                        tracing::debug!(use_case = U::NAME, "use case failed, pending events dropped")
                    }
                    Err(scope_err) => {
                        tracing::debug!(use_case = U::NAME, error = %scope_err, "no event scope to clear")
                    }
                }
                Err(err)
            }
        }
    }
}
