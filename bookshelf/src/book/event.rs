use super::BookId;
use crate::author::AuthorId;
use serde::{Deserialize, Serialize};

/// 书籍添加了作者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorAddedToBook {
    pub book_id: BookId,
    pub author_id: AuthorId,
}
