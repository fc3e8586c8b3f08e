use super::{Author, AuthorId};
use crate::book::BookId;
use bookshelf_domain::entity::Entity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorDto {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub biography: Option<String>,
    pub books: Vec<BookId>,
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: *author.id(),
            first_name: author.name().first_name().to_string(),
            last_name: author.name().last_name().to_string(),
            age: author.age().value(),
            biography: author.biography().map(|b| b.as_str().to_string()),
            books: author.book_ids().to_vec(),
        }
    }
}
