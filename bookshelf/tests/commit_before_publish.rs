mod common;

use async_trait::async_trait;
use bookshelf::author::{AddBookToAuthor, NewAuthorCommand};
use bookshelf::book::{AddAuthor, AddAuthorCommand, Book, BookId, NewBookCommand};
use bookshelf::container::{AuthorSession, BookSession};
use bookshelf::persistence::InMemoryDatabase;
use bookshelf_application::{
    AppError, UnitOfWork, UnitOfWorkFactory, UseCase, commit_then_publish, transactional,
};
use bookshelf_domain::entity::Entity;
use bookshelf_domain::error::DomainResult;
use bookshelf_domain::eventing::EventScope;
use bookshelf_domain::repository::Repository;
use bookshelf_domain::specification::Specification;
use bookshelf_domain::value_object::Version;
use std::sync::Arc;

/// 提交总是失败的书籍会话
struct FailingCommit(BookSession);

#[async_trait]
impl UnitOfWork for FailingCommit {
    async fn begin(&mut self) -> Result<(), AppError> {
        self.0.begin().await
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        Err(AppError::Transaction("storage unavailable".into()))
    }

    async fn rollback(&mut self) -> Result<(), AppError> {
        self.0.rollback().await
    }

    async fn refresh(&mut self) -> Result<(), AppError> {
        self.0.refresh().await
    }
}

#[async_trait]
impl Repository<Book> for FailingCommit {
    async fn find_by_id(&self, id: &BookId) -> DomainResult<Option<Book>> {
        self.0.find_by_id(id).await
    }

    async fn find_all(&self, spec: &dyn Specification<Book>) -> DomainResult<Vec<Book>> {
        self.0.find_all(spec).await
    }

    async fn add(&mut self, entity: Book) -> DomainResult<()> {
        self.0.add(entity).await
    }

    async fn remove(&mut self, id: &BookId) -> DomainResult<bool> {
        self.0.remove(id).await
    }
}

#[tokio::test]
async fn failed_commit_never_reaches_the_author() {
    let db = InMemoryDatabase::new();
    let container = common::container(&db);

    let author = container
        .new_author
        .invoke(NewAuthorCommand {
            first_name: "Octavia".into(),
            last_name: "Butler".into(),
            age: 58,
            biography: None,
        })
        .await
        .unwrap();
    let book = container
        .new_book
        .invoke(NewBookCommand {
            title: "Kindred".into(),
            isbn: "0807083690".into(),
            pages: 264,
            price: 1700,
            publication_year: 1979,
        })
        .await
        .unwrap();

    let books = db.books();
    let add_book_to_author = Arc::new(transactional(AddBookToAuthor::<AuthorSession>::new(), db.authors()));
    let add_author = commit_then_publish(
        AddAuthor::<_, _, FailingCommit>::new(container.find_author.clone(), add_book_to_author),
        move || FailingCommit(books.create()),
    );

    let command = AddAuthorCommand {
        book_id: book.id,
        author_id: author.id,
    };
    let result = EventScope::run(container.registry.clone(), async {
        let result = add_author.invoke(command).await;
        (result, EventScope::pending())
    })
    .await;

    let (result, pending) = result;
    assert!(matches!(result, Err(AppError::Transaction(_))));
    assert_eq!(pending.unwrap(), 0);

    let stored_book = db.books().table().get(&book.id).unwrap();
    assert!(stored_book.authors().is_empty());
    let stored_author = db.authors().table().get(&author.id).unwrap();
    assert!(stored_author.book_ids().is_empty());
    assert_eq!(stored_author.version(), Version::from_value(1));
}
