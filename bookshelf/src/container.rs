//! 依赖装配
//!
//! 每个用例在此处确定自己的事务与事件分发组合，组合方式即类型本身：
//!
//! | 用例 | 组合 |
//! |---|---|
//! | `new_author` / `new_book` / `delete_book` | 读写事务 |
//! | `find_author` / `find_book` / `find_book_by_title` | 只读事务 |
//! | `add_author` | 先提交后发布（提交前经 `find_author` 确认作者存在） |
//! | `add_book_to_author`（事件处理器内部） | 读写事务 |
//!
use crate::author::{AddBookToAuthor, AddBookToAuthorHandler, Author, FindAuthor, NewAuthor};
use crate::book::{AddAuthor, Book, DeleteBook, FindBook, FindBookByTitle, NewBook};
use crate::persistence::{InMemoryDatabase, InMemoryUnitOfWork, SessionFactory};
use bookshelf_application::{
    EventDispatched, Transactional, commit_then_publish, read_only, transactional,
};
use bookshelf_domain::eventing::EventRegistry;
use bookshelf_domain::snowflake::IdGenerator;
use std::sync::Arc;

pub type AuthorSession = InMemoryUnitOfWork<Author>;
pub type BookSession = InMemoryUnitOfWork<Book>;

pub type NewAuthorUseCase = Transactional<NewAuthor<AuthorSession>, SessionFactory<Author>>;
pub type FindAuthorUseCase = Transactional<FindAuthor<AuthorSession>, SessionFactory<Author>>;
pub type AddBookToAuthorUseCase =
    Transactional<AddBookToAuthor<AuthorSession>, SessionFactory<Author>>;
pub type AuthorAddedToBookHandler = AddBookToAuthorHandler<AddBookToAuthorUseCase>;

pub type NewBookUseCase = Transactional<NewBook<BookSession>, SessionFactory<Book>>;
pub type AddAuthorUseCase = EventDispatched<
    Transactional<
        AddAuthor<FindAuthorUseCase, AddBookToAuthorUseCase, BookSession>,
        SessionFactory<Book>,
    >,
>;
pub type DeleteBookUseCase = Transactional<DeleteBook<BookSession>, SessionFactory<Book>>;
pub type FindBookByTitleUseCase = Transactional<FindBookByTitle<BookSession>, SessionFactory<Book>>;
pub type FindBookUseCase = Transactional<FindBook<BookSession>, SessionFactory<Book>>;

pub struct Container {
    pub registry: Arc<EventRegistry>,
    pub new_author: NewAuthorUseCase,
    pub find_author: Arc<FindAuthorUseCase>,
    pub new_book: NewBookUseCase,
    pub add_author: AddAuthorUseCase,
    pub delete_book: DeleteBookUseCase,
    pub find_book_by_title: FindBookByTitleUseCase,
    pub find_book: FindBookUseCase,
}

impl Container {
    pub fn new(db: &InMemoryDatabase, ids: Arc<dyn IdGenerator>) -> Self {
        let registry = Arc::new(EventRegistry::new().register::<AuthorAddedToBookHandler>());

        let find_author = Arc::new(read_only(FindAuthor::new(), db.authors()));
        let add_book_to_author = Arc::new(transactional(AddBookToAuthor::new(), db.authors()));

        Self {
            registry,
            new_author: transactional(NewAuthor::new(ids.clone()), db.authors()),
            find_author: find_author.clone(),
            new_book: transactional(NewBook::new(ids), db.books()),
            add_author: commit_then_publish(
                AddAuthor::new(find_author, add_book_to_author),
                db.books(),
            ),
            delete_book: transactional(DeleteBook::new(), db.books()),
            find_book_by_title: read_only(FindBookByTitle::new(), db.books()),
            find_book: read_only(FindBook::new(), db.books()),
        }
    }
}
