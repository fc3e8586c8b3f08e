//! 领域事件（Domain Event）契约
//!
//! 定义事件处理器需要实现的最小接口（`EventContract`）、处理器签名
//! （`HandlerSignature`）以及事件参数约束（`EventParameter`）。
//! 事件的暂存、校验与并发分发见 `eventing` 模块。

mod event_contract;
mod event_parameter;

pub use event_contract::{EventContract, HandlerSignature, ParamRequirement};
pub use event_parameter::{EventParameter, NoParameter};
