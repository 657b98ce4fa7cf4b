//! GraphQL object types and conversions from core views.
//!
//! Every shape here is statically enumerable: view construction happens
//! in the catalog core, and these types only rename it for the wire.

use async_graphql::{ID, SimpleObject};

use crate::catalog::views::{AuthorView, BookView};
use crate::db::{BookRecord, UserRecord};

/// A book as it appears inside its author's `books` list. Carries no
/// author back-reference, which keeps the object graph finite.
#[derive(Debug, Clone, SimpleObject)]
pub struct OwnedBook {
    pub id: ID,
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
}

impl From<BookRecord> for OwnedBook {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id.to_string().into(),
            title: record.title,
            published: record.published,
            genres: record.genres,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Author {
    pub id: ID,
    pub name: String,
    /// Birth year; null when not recorded.
    pub born: Option<i32>,
    /// Number of books referencing this author, computed at query time.
    pub book_count: i32,
    pub books: Vec<OwnedBook>,
}

impl From<AuthorView> for Author {
    fn from(view: AuthorView) -> Self {
        Self {
            id: view.author.id.to_string().into(),
            name: view.author.name,
            born: view.author.born,
            book_count: view.book_count as i32,
            books: view.books.into_iter().map(OwnedBook::from).collect(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Book {
    pub id: ID,
    pub title: String,
    pub published: i32,
    pub genres: Vec<String>,
    pub author: Author,
}

impl From<BookView> for Book {
    fn from(view: BookView) -> Self {
        Self {
            id: view.book.id.to_string().into(),
            title: view.book.title,
            published: view.book.published,
            genres: view.book.genres,
            author: Author::from(view.author),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub favorite_genre: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id.to_string().into(),
            username: record.username,
            favorite_genre: record.favorite_genre,
        }
    }
}

/// Bearer token issued by login. Opaque to callers.
#[derive(Debug, Clone, SimpleObject)]
pub struct Token {
    pub value: String,
}
