//! HTTP 接口（axum）
//!
//! 每个请求都在 `event_scope` 中间件建立的事件作用域内执行；
//! 500 响应由 `render_internal_errors` 补上联系邮箱。
//!
mod authors;
mod books;
mod error;
mod middleware;

pub use error::{ApiError, InternalError};
pub use middleware::{event_scope, render_internal_errors};

use crate::container::Container;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(container: Arc<Container>, contact_email: impl Into<Arc<str>>) -> Router {
    let registry = container.registry.clone();

    Router::new()
        .route("/authors", post(authors::create))
        .route("/authors/:id", get(authors::find))
        .route("/books", post(books::create).get(books::find_by_title))
        .route("/books/:id", get(books::find).delete(books::delete))
        .route("/books/:id/authors/:author_id", post(books::add_author))
        .with_state(container)
        .layer(axum::middleware::from_fn_with_state(registry, event_scope))
        .layer(axum::middleware::from_fn_with_state(
            contact_email.into(),
            render_internal_errors,
        ))
        .layer(TraceLayer::new_for_http())
}
