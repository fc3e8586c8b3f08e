use super::BookId;
use crate::author::AuthorId;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NewBookCommand {
    pub title: String,
    pub isbn: String,
    pub pages: u32,
    pub price: u64,
    pub publication_year: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AddAuthorCommand {
    pub book_id: BookId,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteBookCommand {
    pub book_id: BookId,
}
