//! 书籍聚合
//!
//! 为书籍添加作者是唯一跨聚合的操作：书籍一侧提交后发布 `author-added-to-book`
//! 事件，由作者模块的处理器回写。
//!
mod command;
mod domain;
mod dto;
mod event;
mod use_case;

pub use command::{AddAuthorCommand, DeleteBookCommand, NewBookCommand};
pub use domain::{Book, BookId, Isbn, Pages, Price, Title, Year};
pub use dto::BookDto;
pub use event::AuthorAddedToBook;
pub use use_case::{AddAuthor, DeleteBook, FindBook, FindBookByTitle, NewBook};
