use super::prelude::*;

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    /// Total number of authors in the catalog
    async fn author_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let count = catalog.author_count().await.map_err(|e| e.extend())?;
        Ok(count as i32)
    }

    /// All authors with their computed book counts
    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let views = catalog.all_authors().await.map_err(|e| e.extend())?;
        Ok(views.into_iter().map(Author::from).collect())
    }

    /// Find an author by exact name, or null
    async fn find_author(&self, ctx: &Context<'_>, name: String) -> Result<Option<Author>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let view = catalog.find_author(&name).await.map_err(|e| e.extend())?;
        Ok(view.map(Author::from))
    }
}
