//! Classified error taxonomy for the catalog core.
//!
//! Soft not-found outcomes (`findAuthor`, `findBook`, `editAuthor` on an
//! unknown name) are represented as `Ok(None)` by their callers, never as
//! an error variant. Everything that does surface here is mapped to a
//! machine-readable `code` extension at the GraphQL boundary, so no raw
//! internal failure ever escapes unclassified.

use async_graphql::ErrorExtensions;
use thiserror::Error;
use uuid::Uuid;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input fails a static contract; the operation was not attempted.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Bad credentials at login, or an unverifiable token.
    #[error("{0}")]
    Authentication(String),

    /// An operation requiring an authenticated caller was invoked without
    /// one. Checked before existence lookups, so it preempts not-found.
    #[error("not authenticated")]
    Authorization,

    /// Storage-layer constraint violation, carrying the offending input.
    #[error("{what} failed: {source}")]
    Persistence {
        what: &'static str,
        input: String,
        #[source]
        source: StoreError,
    },

    /// A stored relationship reference does not resolve. Data corruption;
    /// never silently skipped.
    #[error("book {book_id} references missing author {author_id}")]
    Integrity { book_id: Uuid, author_id: Uuid },

    #[error("internal error: {0}")]
    Internal(String),

    /// Unexpected storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Machine-readable code surfaced in the GraphQL error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Validation { .. } | CatalogError::Persistence { .. } => "BAD_USER_INPUT",
            CatalogError::Authentication(_) => "UNAUTHENTICATED",
            CatalogError::Authorization => "FORBIDDEN",
            CatalogError::Integrity { .. }
            | CatalogError::Internal(_)
            | CatalogError::Store(_) => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            match self {
                CatalogError::Validation { field, .. } => e.set("field", *field),
                CatalogError::Persistence { input, .. } => e.set("invalidArgs", input.as_str()),
                _ => {}
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_taxonomy() {
        let validation = CatalogError::Validation {
            field: "title",
            message: "too short".to_string(),
        };
        assert_eq!(validation.code(), "BAD_USER_INPUT");
        assert_eq!(CatalogError::Authorization.code(), "FORBIDDEN");
        assert_eq!(
            CatalogError::Authentication("wrong credentials".to_string()).code(),
            "UNAUTHENTICATED"
        );
        assert_eq!(
            CatalogError::Integrity {
                book_id: Uuid::nil(),
                author_id: Uuid::nil(),
            }
            .code(),
            "INTERNAL_ERROR"
        );
    }
}
