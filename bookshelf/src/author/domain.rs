use super::NewAuthorCommand;
use crate::book::BookId;
use bookshelf_domain::entity::Entity;
use bookshelf_domain::error::{DomainError, DomainResult};
use bookshelf_domain::value_object::{ValueObject, Version, ensure_char_len, ensure_greater_than};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(u64);

impl AuthorId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 姓名：名与姓各 1..=100 个字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    first_name: String,
    last_name: String,
}

impl Name {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> DomainResult<Self> {
        let name = Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        };
        name.validate()?;
        Ok(name)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl ValueObject for Name {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        ensure_char_len("first_name", &self.first_name, 1..=100)?;
        ensure_char_len("last_name", &self.last_name, 1..=100)
    }
}

/// 年龄：须大于 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(u32);

impl Age {
    pub fn new(value: u32) -> DomainResult<Self> {
        let age = Self(value);
        age.validate()?;
        Ok(age)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl ValueObject for Age {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        ensure_greater_than("age", self.0, 1)
    }
}

/// 简介：1..=3000 个字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biography(String);

impl Biography {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let biography = Self(value.into());
        biography.validate()?;
        Ok(biography)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Biography {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        ensure_char_len("biography", &self.0, 1..=3000)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    id: AuthorId,
    version: Version,
    name: Name,
    age: Age,
    biography: Option<Biography>,
    book_ids: Vec<BookId>,
}

impl Author {
    pub fn new_author(command: NewAuthorCommand, id: AuthorId) -> DomainResult<Self> {
        Ok(Self {
            id,
            version: Version::new(),
            name: Name::new(command.first_name, command.last_name)?,
            age: Age::new(command.age)?,
            biography: command.biography.map(Biography::new).transpose()?,
            book_ids: Vec::new(),
        })
    }

    /// 记录作者参与的书籍，重复添加不产生变化
    pub fn add_book(&mut self, book_id: BookId) -> bool {
        if self.book_ids.contains(&book_id) {
            return false;
        }
        self.book_ids.push(book_id);
        true
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn biography(&self) -> Option<&Biography> {
        self.biography.as_ref()
    }

    pub fn book_ids(&self) -> &[BookId] {
        &self.book_ids
    }
}

impl Entity for Author {
    type Id = AuthorId;

    fn id(&self) -> &AuthorId {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> NewAuthorCommand {
        NewAuthorCommand {
            first_name: "Ursula".into(),
            last_name: "Le Guin".into(),
            age: 88,
            biography: None,
        }
    }

    #[test]
    fn new_author_starts_without_books() {
        let author = Author::new_author(command(), AuthorId::new(1)).unwrap();
        assert!(author.version().is_new());
        assert!(author.book_ids().is_empty());
        assert_eq!(author.name().last_name(), "Le Guin");
    }

    #[test]
    fn field_rules_are_enforced() {
        let mut infant = command();
        infant.age = 1;
        assert!(matches!(
            Author::new_author(infant, AuthorId::new(1)),
            Err(DomainError::InvalidValue { field: "age", .. })
        ));

        let mut blank = command();
        blank.first_name = String::new();
        assert!(Author::new_author(blank, AuthorId::new(1)).is_err());

        let mut empty_bio = command();
        empty_bio.biography = Some(String::new());
        assert!(matches!(
            Author::new_author(empty_bio, AuthorId::new(1)),
            Err(DomainError::InvalidValue { field: "biography", .. })
        ));

        assert!(Biography::new("x".repeat(3000)).is_ok());
        assert!(Biography::new("x".repeat(3001)).is_err());
    }

    #[test]
    fn add_book_is_idempotent() {
        let mut author = Author::new_author(command(), AuthorId::new(1)).unwrap();
        assert!(author.add_book(BookId::new(7)));
        assert!(!author.add_book(BookId::new(7)));
        assert_eq!(author.book_ids(), &[BookId::new(7)]);
    }
}
