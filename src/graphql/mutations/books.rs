//! Catalog mutations: adding books and editing authors.
//!
//! Both operations require an authenticated caller; the auth check runs
//! before validation and existence lookups, so an unauthenticated call
//! never learns whether the named entity exists.

use super::prelude::*;

#[derive(Default)]
pub struct CatalogMutations;

#[Object]
impl CatalogMutations {
    /// Add a book, creating its author on first sight. Requires
    /// authentication.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        published: i32,
        author: String,
        genres: Vec<String>,
    ) -> Result<Book> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let input = NewBook {
            title,
            published,
            author,
            genres,
        };
        let view = catalog
            .add_book(input, ctx.try_auth_user())
            .await
            .map_err(|e| e.extend())?;
        Ok(Book::from(view))
    }

    /// Set an author's birth year. Requires authentication; an unknown
    /// author name yields null, not an error.
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Option<Author>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let view = catalog
            .edit_author(&name, set_born_to, ctx.try_auth_user())
            .await
            .map_err(|e| e.extend())?;
        Ok(view.map(Author::from))
    }
}
