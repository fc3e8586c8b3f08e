use super::AddBookToAuthorCommand;
use crate::book::AuthorAddedToBook;
use anyhow::Context as _;
use async_trait::async_trait;
use bookshelf_application::UseCase;
use bookshelf_domain::domain_event::{EventContract, HandlerSignature};
use std::sync::Arc;

/// `author-added-to-book` 事件处理器
///
/// 书籍一侧提交后，把书籍写入对应作者的书目列表。参数必填。
pub struct AddBookToAuthorHandler<U> {
    use_case: Arc<U>,
}

impl<U> AddBookToAuthorHandler<U> {
    pub fn new(use_case: Arc<U>) -> Self {
        Self { use_case }
    }
}

#[async_trait]
impl<U> EventContract for AddBookToAuthorHandler<U>
where
    U: UseCase<AddBookToAuthorCommand, Output = ()> + 'static,
{
    const NAME: &'static str = "author-added-to-book";
    const SIGNATURE: HandlerSignature = HandlerSignature::REQUIRED;

    type Param = AuthorAddedToBook;

    async fn handle(&self, param: Option<AuthorAddedToBook>) -> anyhow::Result<()> {
        let event = param.context("author-added-to-book requires a parameter")?;
        let command = AddBookToAuthorCommand {
            book_id: event.book_id,
            author_id: event.author_id,
        };

        self.use_case.invoke(command).await?;
        tracing::debug!(
            book_id = %command.book_id,
            author_id = %command.author_id,
            "book recorded on author"
        );
        Ok(())
    }
}
