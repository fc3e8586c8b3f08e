use super::{InMemoryUnitOfWork, Table};
use crate::author::Author;
use crate::book::Book;
use bookshelf_application::UnitOfWorkFactory;
use bookshelf_domain::entity::Entity;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 内存数据库
///
/// 所有表共享同一把提交锁，提交之间串行执行。
pub struct InMemoryDatabase {
    authors: Arc<Table<Author>>,
    books: Arc<Table<Book>>,
    commit_lock: Arc<Mutex<()>>,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self {
            authors: Arc::new(Table::new("authors")),
            books: Arc::new(
                Table::new("books").with_unique_key("isbn", |book: &Book| {
                    book.isbn().as_str().to_string()
                }),
            ),
            commit_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn authors(&self) -> SessionFactory<Author> {
        SessionFactory::new(self.authors.clone(), self.commit_lock.clone())
    }

    pub fn books(&self) -> SessionFactory<Book> {
        SessionFactory::new(self.books.clone(), self.commit_lock.clone())
    }
}

/// 单表会话工厂
pub struct SessionFactory<E: Entity> {
    table: Arc<Table<E>>,
    commit_lock: Arc<Mutex<()>>,
}

impl<E: Entity> SessionFactory<E> {
    fn new(table: Arc<Table<E>>, commit_lock: Arc<Mutex<()>>) -> Self {
        Self { table, commit_lock }
    }

    pub fn table(&self) -> &Arc<Table<E>> {
        &self.table
    }
}

impl<E: Entity> Clone for SessionFactory<E> {
    fn clone(&self) -> Self {
        Self::new(self.table.clone(), self.commit_lock.clone())
    }
}

impl<E: Entity> UnitOfWorkFactory for SessionFactory<E> {
    type Uow = InMemoryUnitOfWork<E>;

    fn create(&self) -> Self::Uow {
        InMemoryUnitOfWork::new(self.table.clone(), self.commit_lock.clone())
    }
}
