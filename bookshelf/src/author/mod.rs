//! 作者聚合
//!
//! 作者维护自己参与的书目列表；书籍添加作者后，通过 `author-added-to-book`
//! 事件在独立事务中回写到作者一侧。
//!
mod command;
mod domain;
mod dto;
mod handler;
mod use_case;

pub use command::{AddBookToAuthorCommand, NewAuthorCommand};
pub use domain::{Age, Author, AuthorId, Biography, Name};
pub use dto::AuthorDto;
pub use handler::AddBookToAuthorHandler;
pub use use_case::{AddBookToAuthor, FindAuthor, NewAuthor};
