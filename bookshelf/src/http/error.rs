use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookshelf_application::AppError;
use bookshelf_domain::error::DomainError;
use serde_json::{Value, json};
use thiserror::Error;

/// 接口层错误
///
/// - 请求数据不合法 → 400 `{title: "invalid:data", description: "wrong value", extra}`；
/// - 未找到 → 404、冲突 → 409，均无响应体；
/// - 其余 → 500，响应体由 `render_internal_errors` 生成。
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request data")]
    InvalidData(Vec<Value>),
    #[error(transparent)]
    App(AppError),
}

/// 挂在 500 响应扩展上的错误信息
#[derive(Debug, Clone)]
pub struct InternalError {
    pub title: &'static str,
    pub description: String,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(DomainError::InvalidValue { field, reason }) => {
                Self::InvalidData(vec![json!({ "field": field, "reason": reason })])
            }
            other => Self::App(other),
        }
    }
}

macro_rules! rejection_into_invalid_data {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    Self::InvalidData(vec![json!({ "reason": rejection.body_text() })])
                }
            }
        )*
    };
}

rejection_into_invalid_data!(JsonRejection, PathRejection, QueryRejection);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::InvalidData(extra) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "title": "invalid:data",
                        "description": "wrong value",
                        "extra": extra,
                    })),
                )
                    .into_response();
            }
            Self::App(err) => err,
        };

        match &err {
            AppError::NotFound(_) | AppError::Domain(DomainError::NotFound { .. }) => {
                return StatusCode::NOT_FOUND.into_response();
            }
            AppError::Domain(
                DomainError::Conflict { .. }
                | DomainError::VersionConflict { .. }
                | DomainError::InvalidState { .. },
            ) => {
                tracing::info!(error = %err, "request conflicted");
                return StatusCode::CONFLICT.into_response();
            }
            _ => {}
        }

        let title = title_of(&err);
        tracing::error!(title, error = %err, "request failed");

        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(InternalError {
            title,
            description: err.to_string(),
        });
        response
    }
}

fn title_of(err: &AppError) -> &'static str {
    if let Some(event_err) = err.as_event_error() {
        return event_err.kind();
    }
    match err {
        AppError::Domain(_) => "DomainError",
        AppError::Transaction(_) => "TransactionError",
        _ => "AppError",
    }
}
