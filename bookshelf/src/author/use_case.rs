use super::{AddBookToAuthorCommand, Author, AuthorDto, AuthorId, NewAuthorCommand};
use async_trait::async_trait;
use bookshelf_application::{AppError, TransactionalUseCase, UnitOfWork};
use bookshelf_domain::entity::Entity;
use bookshelf_domain::repository::Repository;
use bookshelf_domain::snowflake::IdGenerator;
use std::marker::PhantomData;
use std::sync::Arc;

/// 新建作者
pub struct NewAuthor<W> {
    ids: Arc<dyn IdGenerator>,
    _uow: PhantomData<fn() -> W>,
}

impl<W> NewAuthor<W> {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            _uow: PhantomData,
        }
    }
}

#[async_trait]
impl<W> TransactionalUseCase<NewAuthorCommand> for NewAuthor<W>
where
    W: UnitOfWork + Repository<Author>,
{
    const NAME: &'static str = "new-author";

    type Uow = W;
    type Output = AuthorDto;

    async fn execute(&self, uow: &mut W, command: NewAuthorCommand) -> Result<AuthorDto, AppError> {
        let author = Author::new_author(command, AuthorId::new(self.ids.next_id()))?;
        let id = *author.id();
        uow.add(author).await?;

        let stored = uow
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("author {id}")))?;
        tracing::info!(author_id = %id, "author created");
        Ok(AuthorDto::from(&stored))
    }
}

/// 为作者记录新参与的书籍（由 `author-added-to-book` 事件驱动）
pub struct AddBookToAuthor<W> {
    _uow: PhantomData<fn() -> W>,
}

impl<W> AddBookToAuthor<W> {
    pub fn new() -> Self {
        Self { _uow: PhantomData }
    }
}

impl<W> Default for AddBookToAuthor<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<W> TransactionalUseCase<AddBookToAuthorCommand> for AddBookToAuthor<W>
where
    W: UnitOfWork + Repository<Author>,
{
    const NAME: &'static str = "add-book-to-author";

    type Uow = W;
    type Output = ();

    async fn execute(&self, uow: &mut W, command: AddBookToAuthorCommand) -> Result<(), AppError> {
        let mut author = uow
            .find_by_id(&command.author_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("author {}", command.author_id)))?;

        if author.add_book(command.book_id) {
            uow.add(author).await?;
        }
        Ok(())
    }
}

/// 按标识查询作者
pub struct FindAuthor<W> {
    _uow: PhantomData<fn() -> W>,
}

impl<W> FindAuthor<W> {
    pub fn new() -> Self {
        Self { _uow: PhantomData }
    }
}

impl<W> Default for FindAuthor<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<W> TransactionalUseCase<AuthorId> for FindAuthor<W>
where
    W: UnitOfWork + Repository<Author>,
{
    const NAME: &'static str = "find-author";

    type Uow = W;
    type Output = AuthorDto;

    async fn execute(&self, uow: &mut W, id: AuthorId) -> Result<AuthorDto, AppError> {
        uow.find_by_id(&id)
            .await?
            .map(|author| AuthorDto::from(&author))
            .ok_or_else(|| AppError::not_found(format!("author {id}")))
    }
}
