//! Catalog core: query aggregation and the mutation engine.
//!
//! [`CatalogService`] resolves denormalized views from normalized store
//! records, validates and applies mutations, and publishes creation
//! events through the injected [`EventHub`]. It caches nothing across
//! calls: the store is the single source of truth, and every view is
//! re-read before aggregation.

pub mod views;

use std::sync::Arc;

use tracing::{info, warn};

use crate::db::{
    AuthorRecord, BookFilter, BookRecord, CatalogStore, CreateAuthor, CreateBook, StoreError,
};
use crate::error::CatalogError;
use crate::services::auth::AuthUser;
use crate::services::events::{CatalogEvent, EventHub};

pub use views::{AuthorView, BookView};

/// Input for the addBook mutation.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub published: i32,
    pub author: String,
    pub genres: Vec<String>,
}

pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    events: EventHub,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, events: EventHub) -> Self {
        Self { store, events }
    }

    pub async fn book_count(&self) -> Result<u64, CatalogError> {
        Ok(self.store.book_count().await?)
    }

    pub async fn author_count(&self) -> Result<u64, CatalogError> {
        Ok(self.store.author_count().await?)
    }

    /// Aggregate an author record into its view, re-reading the books
    /// that currently reference it.
    async fn author_view(&self, author: AuthorRecord) -> Result<AuthorView, CatalogError> {
        let books = self
            .store
            .list_books(&BookFilter {
                author_id: Some(author.id),
                genre: None,
            })
            .await?;
        Ok(AuthorView::assemble(author, books))
    }

    /// Aggregate a book record into its view. A dangling author
    /// reference is a fatal integrity error, not a skip.
    async fn book_view(&self, book: BookRecord) -> Result<BookView, CatalogError> {
        let author = self
            .store
            .get_author(book.author_id)
            .await?
            .ok_or(CatalogError::Integrity {
                book_id: book.id,
                author_id: book.author_id,
            })?;
        let author = self.author_view(author).await?;
        Ok(BookView { book, author })
    }

    /// All books, optionally narrowed by author name and/or genre
    /// membership. An unknown author name yields an empty list — a soft
    /// miss, not a bad query. Result order is storage iteration order.
    pub async fn all_books(
        &self,
        author_name: Option<&str>,
        genre: Option<String>,
    ) -> Result<Vec<BookView>, CatalogError> {
        let mut filter = BookFilter {
            author_id: None,
            genre,
        };
        if let Some(name) = author_name {
            match self.store.find_author_by_name(name).await? {
                Some(author) => filter.author_id = Some(author.id),
                None => return Ok(Vec::new()),
            }
        }

        let books = self.store.list_books(&filter).await?;
        let mut result = Vec::with_capacity(books.len());
        for book in books {
            result.push(self.book_view(book).await?);
        }
        Ok(result)
    }

    pub async fn all_authors(&self) -> Result<Vec<AuthorView>, CatalogError> {
        let authors = self.store.list_authors().await?;
        let mut result = Vec::with_capacity(authors.len());
        for author in authors {
            result.push(self.author_view(author).await?);
        }
        Ok(result)
    }

    pub async fn find_author(&self, name: &str) -> Result<Option<AuthorView>, CatalogError> {
        match self.store.find_author_by_name(name).await? {
            Some(author) => Ok(Some(self.author_view(author).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_book(&self, title: &str) -> Result<Option<BookView>, CatalogError> {
        match self.store.find_book_by_title(title).await? {
            Some(book) => Ok(Some(self.book_view(book).await?)),
            None => Ok(None),
        }
    }

    /// Add a book, creating its author on first sight. The author
    /// persist step fully completes before the book insert begins, so a
    /// book never references a not-yet-persisted author.
    pub async fn add_book(
        &self,
        input: NewBook,
        caller: Option<&AuthUser>,
    ) -> Result<BookView, CatalogError> {
        let caller = caller.ok_or(CatalogError::Authorization)?;

        if input.title.chars().count() < 5 {
            return Err(CatalogError::Validation {
                field: "title",
                message: "book title must be at least 5 characters long".to_string(),
            });
        }
        if input.author.chars().count() < 4 {
            return Err(CatalogError::Validation {
                field: "author",
                message: "author name must be at least 4 characters long".to_string(),
            });
        }

        let (author, author_created) = self.find_or_create_author(&input.author).await?;

        let book = self
            .store
            .insert_book(CreateBook {
                title: input.title.clone(),
                published: input.published,
                author_id: author.id,
                genres: input.genres,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation { .. } => {
                    warn!(title = %input.title, "saving book failed");
                    CatalogError::Persistence {
                        what: "saving book",
                        input: input.title.clone(),
                        source: e,
                    }
                }
                other => CatalogError::Store(other),
            })?;

        self.store.append_author_book(author.id, book.id).await?;

        if author_created {
            let view = self.author_view(author.clone()).await?;
            self.events.publish(CatalogEvent::AuthorAdded(view));
        }

        let view = self.book_view(book).await?;
        info!(
            book_id = %view.book.id,
            title = %view.book.title,
            author = %view.author.author.name,
            user = %caller.username,
            "book added"
        );
        self.events.publish(CatalogEvent::BookAdded(view.clone()));
        Ok(view)
    }

    /// Look up an author by exact name, creating it when absent. Returns
    /// whether this call created the record. This is the only path that
    /// creates authors; new ones start with no birth year. A concurrent
    /// creator winning the race surfaces as a unique violation here, in
    /// which case we re-read and use the winner.
    async fn find_or_create_author(
        &self,
        name: &str,
    ) -> Result<(AuthorRecord, bool), CatalogError> {
        if let Some(existing) = self.store.find_author_by_name(name).await? {
            return Ok((existing, false));
        }

        match self
            .store
            .insert_author(CreateAuthor {
                name: name.to_string(),
                born: None,
            })
            .await
        {
            Ok(author) => Ok((author, true)),
            Err(e @ StoreError::UniqueViolation { .. }) => {
                match self.store.find_author_by_name(name).await? {
                    Some(author) => Ok((author, false)),
                    None => Err(CatalogError::Persistence {
                        what: "saving author",
                        input: name.to_string(),
                        source: e,
                    }),
                }
            }
            Err(other) => Err(CatalogError::Store(other)),
        }
    }

    /// Set an author's birth year, overwriting unconditionally. The auth
    /// check precedes the existence lookup so an authorization failure
    /// always wins over not-found. Does not publish any event.
    pub async fn edit_author(
        &self,
        name: &str,
        born: i32,
        caller: Option<&AuthUser>,
    ) -> Result<Option<AuthorView>, CatalogError> {
        caller.ok_or(CatalogError::Authorization)?;

        let Some(author) = self.store.find_author_by_name(name).await? else {
            return Ok(None);
        };
        let updated = self
            .store
            .update_author_born(author.id, born)
            .await?
            .ok_or_else(|| {
                CatalogError::Internal(format!("author {} vanished during update", author.id))
            })?;

        info!(author = %updated.name, born, "author birth year updated");
        Ok(Some(self.author_view(updated).await?))
    }
}
