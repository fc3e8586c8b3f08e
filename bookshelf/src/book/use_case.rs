use super::{AddAuthorCommand, AuthorAddedToBook, Book, BookDto, BookId, DeleteBookCommand, NewBookCommand};
use crate::author::{AddBookToAuthorCommand, AddBookToAuthorHandler, AuthorDto, AuthorId};
use async_trait::async_trait;
use bookshelf_application::{AppError, TransactionalUseCase, UnitOfWork, UseCase};
use bookshelf_domain::entity::Entity;
use bookshelf_domain::eventing::EventScope;
use bookshelf_domain::repository::Repository;
use bookshelf_domain::snowflake::IdGenerator;
use std::marker::PhantomData;
use std::sync::Arc;

/// 新建书籍（ISBN 在提交时做唯一性检查）
pub struct NewBook<W> {
    ids: Arc<dyn IdGenerator>,
    _uow: PhantomData<fn() -> W>,
}

impl<W> NewBook<W> {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            _uow: PhantomData,
        }
    }
}

#[async_trait]
impl<W> TransactionalUseCase<NewBookCommand> for NewBook<W>
where
    W: UnitOfWork + Repository<Book>,
{
    const NAME: &'static str = "new-book";

    type Uow = W;
    type Output = BookDto;

    async fn execute(&self, uow: &mut W, command: NewBookCommand) -> Result<BookDto, AppError> {
        let book = Book::new_book(command, BookId::new(self.ids.next_id()))?;
        let id = *book.id();
        uow.add(book).await?;

        let stored = uow
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("book {id}")))?;
        tracing::info!(book_id = %id, "book created");
        Ok(BookDto::from(&stored))
    }
}

/// 为书籍添加作者，并暂存 `author-added-to-book` 事件
///
/// 须以“先提交后发布”的方式注册，作者一侧的处理器只会看到已提交的书籍。
/// 作者不存在时在提交前返回 `NotFound`，书籍不会引用不存在的作者。
pub struct AddAuthor<A, U, W> {
    find_author: Arc<A>,
    add_book_to_author: Arc<U>,
    _uow: PhantomData<fn() -> W>,
}

impl<A, U, W> AddAuthor<A, U, W> {
    pub fn new(find_author: Arc<A>, add_book_to_author: Arc<U>) -> Self {
        Self {
            find_author,
            add_book_to_author,
            _uow: PhantomData,
        }
    }
}

#[async_trait]
impl<A, U, W> TransactionalUseCase<AddAuthorCommand> for AddAuthor<A, U, W>
where
    A: UseCase<AuthorId, Output = AuthorDto> + 'static,
    U: UseCase<AddBookToAuthorCommand, Output = ()> + 'static,
    W: UnitOfWork + Repository<Book>,
{
    const NAME: &'static str = "add-author";

    type Uow = W;
    type Output = ();

    async fn execute(&self, uow: &mut W, command: AddAuthorCommand) -> Result<(), AppError> {
        let mut book = uow
            .find_by_id(&command.book_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("book {}", command.book_id)))?;
        self.find_author.invoke(command.author_id).await?;

        book.add_author(command.author_id)?;
        uow.add(book).await?;

        let handler = Arc::new(AddBookToAuthorHandler::new(self.add_book_to_author.clone()));
        EventScope::store(
            handler,
            Some(AuthorAddedToBook {
                book_id: command.book_id,
                author_id: command.author_id,
            }),
        )?;
        Ok(())
    }
}

/// 删除书籍，书籍不存在时什么也不做
pub struct DeleteBook<W> {
    _uow: PhantomData<fn() -> W>,
}

impl<W> DeleteBook<W> {
    pub fn new() -> Self {
        Self { _uow: PhantomData }
    }
}

impl<W> Default for DeleteBook<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<W> TransactionalUseCase<DeleteBookCommand> for DeleteBook<W>
where
    W: UnitOfWork + Repository<Book>,
{
    const NAME: &'static str = "delete-book";

    type Uow = W;
    type Output = ();

    async fn execute(&self, uow: &mut W, command: DeleteBookCommand) -> Result<(), AppError> {
        if uow.remove(&command.book_id).await? {
            tracing::info!(book_id = %command.book_id, "book deleted");
        }
        Ok(())
    }
}

/// 按书名精确查询
pub struct FindBookByTitle<W> {
    _uow: PhantomData<fn() -> W>,
}

impl<W> FindBookByTitle<W> {
    pub fn new() -> Self {
        Self { _uow: PhantomData }
    }
}

impl<W> Default for FindBookByTitle<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<W> TransactionalUseCase<String> for FindBookByTitle<W>
where
    W: UnitOfWork + Repository<Book>,
{
    const NAME: &'static str = "find-book-by-title";

    type Uow = W;
    type Output = Vec<BookDto>;

    async fn execute(&self, uow: &mut W, title: String) -> Result<Vec<BookDto>, AppError> {
        let same_title = move |book: &Book| book.title().as_str() == title;
        let books = uow.find_all(&same_title).await?;
        Ok(books.iter().map(BookDto::from).collect())
    }
}

/// 按标识查询书籍
pub struct FindBook<W> {
    _uow: PhantomData<fn() -> W>,
}

impl<W> FindBook<W> {
    pub fn new() -> Self {
        Self { _uow: PhantomData }
    }
}

impl<W> Default for FindBook<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<W> TransactionalUseCase<BookId> for FindBook<W>
where
    W: UnitOfWork + Repository<Book>,
{
    const NAME: &'static str = "find-book";

    type Uow = W;
    type Output = BookDto;

    async fn execute(&self, uow: &mut W, id: BookId) -> Result<BookDto, AppError> {
        uow.find_by_id(&id)
            .await?
            .map(|book| BookDto::from(&book))
            .ok_or_else(|| AppError::not_found(format!("book {id}")))
    }
}
