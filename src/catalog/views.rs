//! Denormalized view shapes returned across the API.
//!
//! Views are assembled on demand from stored records plus computed fields
//! and are never persisted. `book_count` is recomputed from storage state
//! at response time, so it is consistent with the store at the instant of
//! read but may be stale by the time the response reaches the caller.

use crate::db::{AuthorRecord, BookRecord};

/// An author plus its computed book count and materialized books.
///
/// `books` holds full records, not references; they carry no nested
/// author back-reference, which keeps the view statically shaped.
#[derive(Debug, Clone)]
pub struct AuthorView {
    pub author: AuthorRecord,
    pub book_count: usize,
    pub books: Vec<BookRecord>,
}

impl AuthorView {
    /// Assemble the view from a record and the books currently
    /// referencing it. The count is derived from the passed books, never
    /// from the record's relationship array.
    pub fn assemble(author: AuthorRecord, books: Vec<BookRecord>) -> Self {
        Self {
            author,
            book_count: books.len(),
            books,
        }
    }
}

/// A book plus its materialized author view. The nested `book_count` is
/// always the author's global count, independent of any filter applied
/// to the list this view came from.
#[derive(Debug, Clone)]
pub struct BookView {
    pub book: BookRecord,
    pub author: AuthorView,
}
