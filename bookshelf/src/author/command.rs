use super::AuthorId;
use crate::book::BookId;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NewAuthorCommand {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    #[serde(default)]
    pub biography: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AddBookToAuthorCommand {
    pub book_id: BookId,
    pub author_id: AuthorId,
}
