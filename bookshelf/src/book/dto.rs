use super::{Book, BookId};
use crate::author::AuthorId;
use bookshelf_domain::entity::Entity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDto {
    pub id: BookId,
    pub title: String,
    pub isbn: String,
    pub pages: u32,
    pub price: u64,
    pub publication_year: u32,
    pub authors: Vec<AuthorId>,
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: *book.id(),
            title: book.title().as_str().to_string(),
            isbn: book.isbn().as_str().to_string(),
            pages: book.pages().value(),
            price: book.price().value(),
            publication_year: book.publication_year().value(),
            authors: book.authors().to_vec(),
        }
    }
}
