use super::ApiError;
use crate::author::{AuthorDto, AuthorId, NewAuthorCommand};
use crate::container::Container;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bookshelf_application::UseCase;
use std::sync::Arc;

pub async fn create(
    State(container): State<Arc<Container>>,
    body: Result<Json<NewAuthorCommand>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthorId>), ApiError> {
    let Json(command) = body?;
    let author = container.new_author.invoke(command).await?;
    Ok((StatusCode::CREATED, Json(author.id)))
}

pub async fn find(
    State(container): State<Arc<Container>>,
    id: Result<Path<AuthorId>, PathRejection>,
) -> Result<Json<AuthorDto>, ApiError> {
    let Path(id) = id?;
    Ok(Json(container.find_author.invoke(id).await?))
}
