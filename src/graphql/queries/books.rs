use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Total number of books in the catalog
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let count = catalog.book_count().await.map_err(|e| e.extend())?;
        Ok(count as i32)
    }

    /// All books, optionally filtered by author name and/or genre membership
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Book>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let views = catalog
            .all_books(author.as_deref(), genre)
            .await
            .map_err(|e| e.extend())?;
        Ok(views.into_iter().map(Book::from).collect())
    }

    /// Find a book by exact title, or null
    async fn find_book(&self, ctx: &Context<'_>, title: String) -> Result<Option<Book>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let view = catalog.find_book(&title).await.map_err(|e| e.extend())?;
        Ok(view.map(Book::from))
    }

    /// Books whose genre list contains the given genre
    async fn books_by_genre(&self, ctx: &Context<'_>, genre: String) -> Result<Vec<Book>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let views = catalog
            .all_books(None, Some(genre))
            .await
            .map_err(|e| e.extend())?;
        Ok(views.into_iter().map(Book::from).collect())
    }

    /// Books written by the named author
    async fn books_by_author(&self, ctx: &Context<'_>, author: String) -> Result<Vec<Book>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let views = catalog
            .all_books(Some(&author), None)
            .await
            .map_err(|e| e.extend())?;
        Ok(views.into_iter().map(Book::from).collect())
    }
}
