//! In-memory catalog store.
//!
//! Records live in insertion-ordered vectors behind a tokio `RwLock`, so
//! every operation is an await point and concurrent operations interleave
//! at the same boundaries they would against a real driver. Uniqueness of
//! author names, book titles, and usernames is enforced on insert.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AuthorRecord, BookFilter, BookRecord, CatalogStore, CreateAuthor, CreateBook, CreateUser,
    StoreError, UserRecord,
};

#[derive(Default)]
struct State {
    authors: Vec<AuthorRecord>,
    books: Vec<BookRecord>,
    users: Vec<UserRecord>,
}

/// Process-local [`CatalogStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(book: &BookRecord, filter: &BookFilter) -> bool {
    if let Some(author_id) = filter.author_id {
        if book.author_id != author_id {
            return false;
        }
    }
    if let Some(genre) = &filter.genre {
        // Membership, not equality.
        if !book.genres.iter().any(|g| g == genre) {
            return false;
        }
    }
    true
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn book_count(&self) -> Result<u64, StoreError> {
        Ok(self.state.read().await.books.len() as u64)
    }

    async fn author_count(&self) -> Result<u64, StoreError> {
        Ok(self.state.read().await.authors.len() as u64)
    }

    async fn list_books(&self, filter: &BookFilter) -> Result<Vec<BookRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .books
            .iter()
            .filter(|b| matches(b, filter))
            .cloned()
            .collect())
    }

    async fn find_book_by_title(&self, title: &str) -> Result<Option<BookRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state.books.iter().find(|b| b.title == title).cloned())
    }

    async fn insert_book(&self, create: CreateBook) -> Result<BookRecord, StoreError> {
        let mut state = self.state.write().await;
        if state.books.iter().any(|b| b.title == create.title) {
            return Err(StoreError::UniqueViolation {
                field: "title",
                value: create.title,
            });
        }
        let record = BookRecord {
            id: Uuid::new_v4(),
            title: create.title,
            published: create.published,
            author_id: create.author_id,
            genres: create.genres,
        };
        state.books.push(record.clone());
        Ok(record)
    }

    async fn list_authors(&self) -> Result<Vec<AuthorRecord>, StoreError> {
        Ok(self.state.read().await.authors.clone())
    }

    async fn get_author(&self, id: Uuid) -> Result<Option<AuthorRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_author_by_name(&self, name: &str) -> Result<Option<AuthorRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state.authors.iter().find(|a| a.name == name).cloned())
    }

    async fn insert_author(&self, create: CreateAuthor) -> Result<AuthorRecord, StoreError> {
        let mut state = self.state.write().await;
        if state.authors.iter().any(|a| a.name == create.name) {
            return Err(StoreError::UniqueViolation {
                field: "name",
                value: create.name,
            });
        }
        let record = AuthorRecord {
            id: Uuid::new_v4(),
            name: create.name,
            born: create.born,
            books: Vec::new(),
        };
        state.authors.push(record.clone());
        Ok(record)
    }

    async fn update_author_born(
        &self,
        id: Uuid,
        born: i32,
    ) -> Result<Option<AuthorRecord>, StoreError> {
        let mut state = self.state.write().await;
        match state.authors.iter_mut().find(|a| a.id == id) {
            Some(author) => {
                author.born = Some(born);
                Ok(Some(author.clone()))
            }
            None => Ok(None),
        }
    }

    async fn append_author_book(&self, author_id: Uuid, book_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let author = state
            .authors
            .iter_mut()
            .find(|a| a.id == author_id)
            .ok_or_else(|| StoreError::Backend(format!("author {author_id} not found")))?;
        author.books.push(book_id);
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, create: CreateUser) -> Result<UserRecord, StoreError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.username == create.username) {
            return Err(StoreError::UniqueViolation {
                field: "username",
                value: create.username,
            });
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: create.username,
            favorite_genre: create.favorite_genre,
            password_hash: create.password_hash,
        };
        state.users.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn create_book(title: &str, author_id: Uuid, genres: &[&str]) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            published: 2000,
            author_id,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn author_name_is_unique() {
        let store = MemoryStore::new();
        store
            .insert_author(CreateAuthor {
                name: "Sandi Metz".to_string(),
                born: None,
            })
            .await
            .unwrap();

        let err = store
            .insert_author(CreateAuthor {
                name: "Sandi Metz".to_string(),
                born: Some(1960),
            })
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation { field: "name", .. });
    }

    #[tokio::test]
    async fn book_title_is_unique() {
        let store = MemoryStore::new();
        let author = store
            .insert_author(CreateAuthor {
                name: "Robert Martin".to_string(),
                born: None,
            })
            .await
            .unwrap();

        store
            .insert_book(create_book("Clean Code", author.id, &["refactoring"]))
            .await
            .unwrap();
        let err = store
            .insert_book(create_book("Clean Code", author.id, &[]))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation { field: "title", .. });
    }

    #[tokio::test]
    async fn genre_filter_is_membership_not_equality() {
        let store = MemoryStore::new();
        let author = store
            .insert_author(CreateAuthor {
                name: "Martin Fowler".to_string(),
                born: None,
            })
            .await
            .unwrap();
        store
            .insert_book(create_book(
                "Refactoring",
                author.id,
                &["refactoring", "design"],
            ))
            .await
            .unwrap();
        store
            .insert_book(create_book("Patterns book", author.id, &["patterns"]))
            .await
            .unwrap();

        let filter = BookFilter {
            author_id: None,
            genre: Some("design".to_string()),
        };
        let books = store.list_books(&filter).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Refactoring");
    }

    #[tokio::test]
    async fn lists_preserve_insertion_order() {
        let store = MemoryStore::new();
        let author = store
            .insert_author(CreateAuthor {
                name: "Fyodor Dostoevsky".to_string(),
                born: Some(1821),
            })
            .await
            .unwrap();
        for title in ["Crime and punishment", "The Idiot", "Demons book"] {
            store
                .insert_book(create_book(title, author.id, &["classic"]))
                .await
                .unwrap();
        }

        let books = store.list_books(&BookFilter::default()).await.unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Crime and punishment", "The Idiot", "Demons book"]
        );
    }

    #[tokio::test]
    async fn username_is_unique() {
        let store = MemoryStore::new();
        store
            .insert_user(CreateUser {
                username: "reader".to_string(),
                favorite_genre: "classic".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let err = store
            .insert_user(CreateUser {
                username: "reader".to_string(),
                favorite_genre: "crime".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation { field: "username", .. });
    }
}
