use super::ApiError;
use crate::author::AuthorId;
use crate::book::{AddAuthorCommand, BookDto, BookId, DeleteBookCommand, NewBookCommand};
use crate::container::Container;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use bookshelf_application::UseCase;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    title: String,
}

pub async fn create(
    State(container): State<Arc<Container>>,
    body: Result<Json<NewBookCommand>, JsonRejection>,
) -> Result<(StatusCode, Json<BookId>), ApiError> {
    let Json(command) = body?;
    let book = container.new_book.invoke(command).await?;
    Ok((StatusCode::CREATED, Json(book.id)))
}

pub async fn find_by_title(
    State(container): State<Arc<Container>>,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Result<Json<Vec<BookDto>>, ApiError> {
    let Query(TitleQuery { title }) = query?;
    Ok(Json(container.find_book_by_title.invoke(title).await?))
}

pub async fn find(
    State(container): State<Arc<Container>>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<Json<BookDto>, ApiError> {
    let Path(id) = id?;
    Ok(Json(container.find_book.invoke(id).await?))
}

pub async fn add_author(
    State(container): State<Arc<Container>>,
    ids: Result<Path<(BookId, AuthorId)>, PathRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let Path((book_id, author_id)) = ids?;
    container
        .add_author
        .invoke(AddAuthorCommand { book_id, author_id })
        .await?;
    Ok(Json("OK"))
}

pub async fn delete(
    State(container): State<Arc<Container>>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(book_id) = id?;
    container
        .delete_book
        .invoke(DeleteBookCommand { book_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
