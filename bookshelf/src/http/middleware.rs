use super::InternalError;
use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use bookshelf_domain::eventing::{EventRegistry, EventScope};
use serde_json::json;
use std::sync::Arc;

/// 为整个请求绑定事件作用域，请求结束（包括出错与取消）时解除
pub async fn event_scope(
    State(registry): State<Arc<EventRegistry>>,
    req: Request,
    next: Next,
) -> Response {
    EventScope::run(registry, next.run(req)).await
}

/// 将内部错误渲染为带联系邮箱的 JSON
pub async fn render_internal_errors(
    State(contact_email): State<Arc<str>>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let Some(err) = response.extensions_mut().remove::<InternalError>() else {
        return response;
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "title": err.title,
            "description": format!("{}, Contact me ({contact_email})", err.description),
        })),
    )
        .into_response()
}
