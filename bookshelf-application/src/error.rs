use bookshelf_domain::error::{DomainError, EventError};

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("event: {0}")]
    Event(#[from] EventError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transaction: {0}")]
    Transaction(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// 取出事件系统错误（无论是直接产生还是经由领域错误传递）
    pub fn as_event_error(&self) -> Option<&EventError> {
        match self {
            Self::Event(err) | Self::Domain(DomainError::Event(err)) => Some(err),
            _ => None,
        }
    }
}
