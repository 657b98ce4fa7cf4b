//! Catalog storage interface.
//!
//! The catalog core talks to storage exclusively through [`CatalogStore`].
//! List operations return records in insertion order and never sort;
//! callers that need sorted output sort downstream. Uniqueness of author
//! names, book titles, and usernames is a storage-level constraint — the
//! mutation engine's lookup-or-create race policy depends on it.

pub mod memory;
pub mod seed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;

/// Stored author. `books` mirrors the relationship for ordered traversal;
/// the foreign key itself lives on the book record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: Uuid,
    pub name: String,
    /// Birth year. Absent renders as null in the API, never as zero.
    pub born: Option<i32>,
    pub books: Vec<Uuid>,
}

/// Stored book. `author_id` must resolve to an existing author at read
/// time; a dangling reference is data corruption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: Uuid,
    pub title: String,
    pub published: i32,
    pub author_id: Uuid,
    /// Order-preserving genre membership set.
    pub genres: Vec<String>,
}

/// Stored user. Never mutated or deleted once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub favorite_genre: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
    pub born: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub published: i32,
    pub author_id: Uuid,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub favorite_genre: String,
    pub password_hash: String,
}

/// Field-equality / membership filter for book listings. `genre` matches
/// books whose genre set contains the value, not books whose set equals it.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub author_id: Option<Uuid>,
    pub genre: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {field}: {value:?}")]
    UniqueViolation { field: &'static str, value: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable storage for catalog records, queryable by identity and by
/// field-equality/membership filters.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn book_count(&self) -> Result<u64, StoreError>;
    async fn author_count(&self) -> Result<u64, StoreError>;

    async fn list_books(&self, filter: &BookFilter) -> Result<Vec<BookRecord>, StoreError>;
    async fn find_book_by_title(&self, title: &str) -> Result<Option<BookRecord>, StoreError>;
    async fn insert_book(&self, create: CreateBook) -> Result<BookRecord, StoreError>;

    async fn list_authors(&self) -> Result<Vec<AuthorRecord>, StoreError>;
    async fn get_author(&self, id: Uuid) -> Result<Option<AuthorRecord>, StoreError>;
    async fn find_author_by_name(&self, name: &str) -> Result<Option<AuthorRecord>, StoreError>;
    async fn insert_author(&self, create: CreateAuthor) -> Result<AuthorRecord, StoreError>;
    async fn update_author_born(
        &self,
        id: Uuid,
        born: i32,
    ) -> Result<Option<AuthorRecord>, StoreError>;
    async fn append_author_book(&self, author_id: Uuid, book_id: Uuid) -> Result<(), StoreError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError>;
    async fn insert_user(&self, create: CreateUser) -> Result<UserRecord, StoreError>;
}
