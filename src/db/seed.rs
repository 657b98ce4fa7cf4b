//! Demo catalog data for development setups.
//!
//! Inserts the sample authors and books the frontend exercises expect.
//! Skipped entirely when the store already holds any authors, so re-runs
//! are idempotent.

use anyhow::Result;
use tracing::{debug, info};

use super::{CatalogStore, CreateAuthor, CreateBook};

struct SeedAuthor {
    name: &'static str,
    born: Option<i32>,
}

struct SeedBook {
    title: &'static str,
    published: i32,
    author: &'static str,
    genres: &'static [&'static str],
}

const AUTHORS: &[SeedAuthor] = &[
    SeedAuthor {
        name: "Robert Martin",
        born: Some(1952),
    },
    SeedAuthor {
        name: "Martin Fowler",
        born: Some(1963),
    },
    SeedAuthor {
        name: "Fyodor Dostoevsky",
        born: Some(1821),
    },
    // Birth years not known for the last two.
    SeedAuthor {
        name: "Joshua Kerievsky",
        born: None,
    },
    SeedAuthor {
        name: "Sandi Metz",
        born: None,
    },
];

const BOOKS: &[SeedBook] = &[
    SeedBook {
        title: "Clean Code",
        published: 2008,
        author: "Robert Martin",
        genres: &["refactoring"],
    },
    SeedBook {
        title: "Agile software development",
        published: 2002,
        author: "Robert Martin",
        genres: &["agile", "patterns", "design"],
    },
    SeedBook {
        title: "Refactoring, edition 2",
        published: 2018,
        author: "Martin Fowler",
        genres: &["refactoring"],
    },
    SeedBook {
        title: "Refactoring to patterns",
        published: 2008,
        author: "Joshua Kerievsky",
        genres: &["refactoring", "patterns"],
    },
    SeedBook {
        title: "Practical Object-Oriented Design, An Agile Primer Using Ruby",
        published: 2012,
        author: "Sandi Metz",
        genres: &["refactoring", "design"],
    },
    SeedBook {
        title: "Crime and punishment",
        published: 1866,
        author: "Fyodor Dostoevsky",
        genres: &["classic", "crime"],
    },
    SeedBook {
        title: "The Demon",
        published: 1872,
        author: "Fyodor Dostoevsky",
        genres: &["classic", "revolution"],
    },
];

/// Load the demo catalog into an empty store.
pub async fn load_demo_catalog(store: &dyn CatalogStore) -> Result<()> {
    if store.author_count().await? > 0 {
        debug!("store already populated, skipping demo seed");
        return Ok(());
    }

    for author in AUTHORS {
        store
            .insert_author(CreateAuthor {
                name: author.name.to_string(),
                born: author.born,
            })
            .await?;
    }

    for book in BOOKS {
        let author = store
            .find_author_by_name(book.author)
            .await?
            .ok_or_else(|| anyhow::anyhow!("seed author {} missing", book.author))?;
        let record = store
            .insert_book(CreateBook {
                title: book.title.to_string(),
                published: book.published,
                author_id: author.id,
                genres: book.genres.iter().map(|g| g.to_string()).collect(),
            })
            .await?;
        store.append_author_book(author.id, record.id).await?;
    }

    info!(
        authors = AUTHORS.len(),
        books = BOOKS.len(),
        "demo catalog seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{BookFilter, MemoryStore};

    #[tokio::test]
    async fn seed_is_idempotent() {
        let store = MemoryStore::new();
        load_demo_catalog(&store).await.unwrap();
        load_demo_catalog(&store).await.unwrap();

        assert_eq!(store.author_count().await.unwrap(), 5);
        assert_eq!(store.book_count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn seeded_books_link_back_to_their_authors() {
        let store = MemoryStore::new();
        load_demo_catalog(&store).await.unwrap();

        let dostoevsky = store
            .find_author_by_name("Fyodor Dostoevsky")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(dostoevsky.books.len(), 2);

        let books = store
            .list_books(&BookFilter {
                author_id: Some(dostoevsky.id),
                genre: None,
            })
            .await
            .unwrap();
        assert_eq!(books.len(), 2);
    }
}
