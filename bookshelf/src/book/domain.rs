use super::NewBookCommand;
use crate::author::AuthorId;
use bookshelf_domain::entity::Entity;
use bookshelf_domain::error::{DomainError, DomainResult};
use bookshelf_domain::value_object::{ValueObject, Version, ensure_char_len, ensure_greater_than};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! text_value {
    ($(#[$meta:meta])* $name:ident, $field:literal, $range:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                let value = Self(value.into());
                value.validate()?;
                Ok(value)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ValueObject for $name {
            type Error = DomainError;

            fn validate(&self) -> DomainResult<()> {
                ensure_char_len($field, &self.0, $range)
            }
        }
    };
}

macro_rules! counted_value {
    ($name:ident, $ty:ty, $field:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name($ty);

        impl $name {
            pub fn new(value: $ty) -> DomainResult<Self> {
                let value = Self(value);
                value.validate()?;
                Ok(value)
            }

            pub fn value(&self) -> $ty {
                self.0
            }
        }

        impl ValueObject for $name {
            type Error = DomainError;

            fn validate(&self) -> DomainResult<()> {
                ensure_greater_than($field, self.0, 1)
            }
        }
    };
}

text_value!(
    /// 书名：1..=100 个字符
    Title, "title", 1..=100
);
text_value!(
    /// ISBN：恰好 10 个字符
    Isbn, "isbn", 10..=10
);
// 数值类字段均须大于 1
counted_value!(Pages, u32, "pages");
counted_value!(Price, u64, "price");
counted_value!(Year, u32, "publication_year");

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: BookId,
    version: Version,
    title: Title,
    isbn: Isbn,
    pages: Pages,
    price: Price,
    publication_year: Year,
    authors: Vec<AuthorId>,
}

impl Book {
    pub fn new_book(command: NewBookCommand, id: BookId) -> DomainResult<Self> {
        Ok(Self {
            id,
            version: Version::new(),
            title: Title::new(command.title)?,
            isbn: Isbn::new(command.isbn)?,
            pages: Pages::new(command.pages)?,
            price: Price::new(command.price)?,
            publication_year: Year::new(command.publication_year)?,
            authors: Vec::new(),
        })
    }

    /// 添加作者，同一作者不能重复添加
    pub fn add_author(&mut self, author_id: AuthorId) -> DomainResult<()> {
        if self.authors.contains(&author_id) {
            return Err(DomainError::invalid_state(format!(
                "author {author_id} is already on book {}",
                self.id
            )));
        }
        self.authors.push(author_id);
        Ok(())
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn pages(&self) -> Pages {
        self.pages
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn publication_year(&self) -> Year {
        self.publication_year
    }

    pub fn authors(&self) -> &[AuthorId] {
        &self.authors
    }
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> &BookId {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}
