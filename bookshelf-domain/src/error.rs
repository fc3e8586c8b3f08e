//! 领域层统一错误定义
//!
//! 聚焦值对象校验、领域规则、仓储与请求级事件系统的最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use std::fmt;
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 事件系统 ---
    #[error(transparent)]
    Event(#[from] EventError),

    // --- 仓储/持久化 ---
    #[error("version conflict: expected={expected}, actual={actual}")]
    VersionConflict { expected: usize, actual: usize },
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    // --- 领域规则/状态 ---
    #[error("invalid value: field={field}, reason={reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("not found: {reason}")]
    NotFound { reason: String },
}

impl DomainError {
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

/// 请求级事件系统错误
///
/// - `EmptyContext`：当前执行流未绑定事件上下文（中间件未安装），属于配置错误；
/// - `InvalidEventType` / `InvalidParameterType` / `ParameterCount` / `RequiredParameter`：
///   事件契约违规，在 `store` 时立即失败，且不会修改上下文；
/// - `HandlerFailures`：`publish` 时并发执行的处理器失败汇总，单个失败不影响其他处理器。
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event context is empty, check that the event scope middleware is installed")]
    EmptyContext,

    #[error("`{0}` is not a registered event type")]
    InvalidEventType(String),

    #[error("parameter of `{event}` must be a structured value object, found {found}")]
    InvalidParameterType { event: String, found: &'static str },

    #[error("`{event}` must declare exactly one parameter, found {found}")]
    ParameterCount { event: String, found: usize },

    #[error("`{0}` event requires a parameter")]
    RequiredParameter(String),

    #[error("{} event handler(s) failed: {}", .0.len(), summarize(.0))]
    HandlerFailures(Vec<HandlerFailure>),
}

impl EventError {
    /// 错误种类名（用于日志与接口响应标题）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyContext => "EmptyContext",
            Self::InvalidEventType(_) => "InvalidEventType",
            Self::InvalidParameterType { .. } => "InvalidParameterType",
            Self::ParameterCount { .. } => "ParameterCount",
            Self::RequiredParameter(_) => "RequiredParameter",
            Self::HandlerFailures(_) => "HandlerFailures",
        }
    }
}

/// 单个事件处理器的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub handler: String,
    pub reason: String,
}

impl HandlerFailure {
    pub fn new(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.handler, self.reason)
    }
}

fn summarize(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_failures_message_lists_every_handler() {
        let err = EventError::HandlerFailures(vec![
            HandlerFailure::new("a", "boom"),
            HandlerFailure::new("b", "bang"),
        ]);
        assert_eq!(err.to_string(), "2 event handler(s) failed: a: boom; b: bang");
    }

    #[test]
    fn event_error_is_transparent_inside_domain_error() {
        let err: DomainError = EventError::RequiredParameter("author-added".into()).into();
        assert_eq!(err.to_string(), "`author-added` event requires a parameter");
    }
}
