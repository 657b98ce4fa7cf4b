//! In-process event hub for catalog creation notifications.
//!
//! A bounded broadcast channel fans every published event out to all
//! currently registered subscribers, each of which consumes its own
//! receiver independently and in publish order. A subscriber that falls
//! behind by more than the buffer capacity loses the oldest events rather
//! than blocking the publisher; dropping a receiver releases its slot.
//!
//! The hub is constructed in `main` and passed by reference to the
//! mutation engine and the subscription resolvers — there is no global
//! singleton.

use tokio::sync::broadcast;
use tracing::debug;

use crate::catalog::views::{AuthorView, BookView};

/// Events published when catalog entities are created. Birth-year edits
/// publish nothing.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    BookAdded(BookView),
    AuthorAdded(AuthorView),
}

/// Per-subscriber buffer size when none is configured.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventHub {
    tx: broadcast::Sender<CatalogEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Deliver an event to every currently registered subscriber. A
    /// subscriber registered after this call never sees the event; there
    /// is no replay or backlog.
    pub fn publish(&self, event: CatalogEvent) {
        // send only errors when nobody is listening, which is fine.
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(subscribers = delivered, "catalog event published");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tokio::sync::broadcast::error::TryRecvError;
    use uuid::Uuid;

    use super::*;
    use crate::db::{AuthorRecord, BookRecord};

    fn book_event(title: &str) -> CatalogEvent {
        let author = AuthorRecord {
            id: Uuid::new_v4(),
            name: "Robert Martin".to_string(),
            born: Some(1952),
            books: Vec::new(),
        };
        let book = BookRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            published: 2008,
            author_id: author.id,
            genres: vec!["refactoring".to_string()],
        };
        CatalogEvent::BookAdded(BookView {
            author: AuthorView::assemble(author, vec![book.clone()]),
            book,
        })
    }

    #[tokio::test]
    async fn every_subscriber_receives_every_event() {
        let hub = EventHub::default();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        hub.publish(book_event("Clean Code"));

        for rx in [&mut a, &mut b] {
            let event = rx.recv().await.unwrap();
            assert_matches!(event, CatalogEvent::BookAdded(view) if view.book.title == "Clean Code");
        }
    }

    #[tokio::test]
    async fn late_subscriber_sees_no_backlog() {
        let hub = EventHub::default();
        let mut early = hub.subscribe();

        hub.publish(book_event("Clean Code"));

        let mut late = hub.subscribe();
        hub.publish(book_event("Refactoring, edition 2"));

        assert_matches!(early.recv().await.unwrap(), CatalogEvent::BookAdded(v) if v.book.title == "Clean Code");
        assert_matches!(early.recv().await.unwrap(), CatalogEvent::BookAdded(v) if v.book.title == "Refactoring, edition 2");

        assert_matches!(late.recv().await.unwrap(), CatalogEvent::BookAdded(v) if v.book.title == "Refactoring, edition 2");
        assert_matches!(late.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn lagging_subscriber_drops_oldest() {
        let hub = EventHub::new(2);
        let mut rx = hub.subscribe();

        hub.publish(book_event("first event"));
        hub.publish(book_event("second event"));
        hub.publish(book_event("third event"));

        assert_matches!(rx.try_recv(), Err(TryRecvError::Lagged(1)));
        assert_matches!(rx.recv().await.unwrap(), CatalogEvent::BookAdded(v) if v.book.title == "second event");
        assert_matches!(rx.recv().await.unwrap(), CatalogEvent::BookAdded(v) if v.book.title == "third event");
    }

    #[tokio::test]
    async fn dropping_a_receiver_releases_its_slot() {
        let hub = EventHub::default();
        let rx = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);
        drop(rx);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
