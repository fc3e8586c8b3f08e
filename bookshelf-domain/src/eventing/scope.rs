use super::{EventHandlerContext, EventRegistry, EventValidator};
use crate::domain_event::EventContract;
use crate::error::EventError;
use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

tokio::task_local! {
    static CURRENT: RefCell<EventHandlerContext>;
}

/// 请求作用域内的事件上下文绑定
///
/// `run` 为一个 future 绑定全新的 `EventHandlerContext`，future 结束（成功、失败、panic 或被取消）
/// 时绑定随之解除，未发布的事件一并丢弃。作用域内任意位置都可以通过静态方法访问当前上下文，
/// 未绑定时返回 `EventError::EmptyContext`。
///
/// # 示例
///
/// ```
/// use bookshelf_domain::eventing::{EventRegistry, EventScope};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = Arc::new(EventRegistry::new());
/// let pending = EventScope::run(registry, async { EventScope::pending() }).await;
/// assert_eq!(pending.unwrap(), 0);
///
/// assert!(EventScope::pending().is_err());
/// # }
/// ```
pub struct EventScope;

impl EventScope {
    pub async fn run<F>(registry: Arc<EventRegistry>, fut: F) -> F::Output
    where
        F: Future,
    {
        let context = EventHandlerContext::new(EventValidator::new(registry));
        CURRENT.scope(RefCell::new(context), fut).await
    }

    /// 当前执行流是否绑定了事件上下文
    pub fn is_bound() -> bool {
        CURRENT.try_with(|_| ()).is_ok()
    }

    pub fn store<E: EventContract>(event: Arc<E>, param: Option<E::Param>) -> Result<(), EventError> {
        Self::with(|ctx| ctx.store(event, param))?
    }

    /// 发布当前上下文中的全部事件
    ///
    /// 先在同步区间内取出事件再等待分发，`RefCell` 借用不会跨越 await。
    pub async fn publish() -> Result<(), EventError> {
        let batch = Self::with(EventHandlerContext::drain)?;
        batch.dispatch().await
    }

    pub fn pending() -> Result<usize, EventError> {
        Self::with(|ctx| ctx.len())
    }

    pub fn clear() -> Result<(), EventError> {
        Self::with(EventHandlerContext::clear)
    }

    fn with<R>(f: impl FnOnce(&mut EventHandlerContext) -> R) -> Result<R, EventError> {
        CURRENT
            .try_with(|cell| f(&mut cell.borrow_mut()))
            .map_err(|_| EventError::EmptyContext)
    }
}
