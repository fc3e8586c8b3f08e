//! 请求级事件子系统（eventing）
//!
//! 在一次请求的生命周期内暂存领域事件，并在用例成功后统一分发：
//! - `EventRegistry`：启动时声明的、封闭的事件类型集合；
//! - `EventValidator`：暂存前对事件类型与参数形状进行纯校验；
//! - `EventHandlerContext`：事件实例到参数的映射，`publish` 时并发执行并清空；
//! - `EventScope`：基于 task-local 的上下文绑定，进入请求时创建，退出时销毁。
//!
//! 单个处理器失败不会中断其他处理器，所有失败汇总为 `EventError::HandlerFailures`。
//!
mod context;
mod registry;
mod scope;
mod validator;

pub use context::{EventHandlerContext, PendingBatch};
pub use registry::EventRegistry;
pub use scope::EventScope;
pub use validator::EventValidator;
