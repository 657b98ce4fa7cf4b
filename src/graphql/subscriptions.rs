//! GraphQL subscriptions for catalog creation events.
//!
//! Each subscription takes its own receiver from the event hub, so every
//! active subscriber sees every event published after it registered.

use async_graphql::{Context, Subscription};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::services::{CatalogEvent, EventHub};

use super::types::{Author, Book};

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Fires once for every book created after the subscription started
    async fn book_added<'ctx>(&self, ctx: &Context<'ctx>) -> impl Stream<Item = Book> + 'ctx {
        let hub = ctx.data_unchecked::<EventHub>();

        BroadcastStream::new(hub.subscribe()).filter_map(|result| {
            result.ok().and_then(|event| match event {
                CatalogEvent::BookAdded(view) => Some(Book::from(view)),
                _ => None,
            })
        })
    }

    /// Fires once for every newly created author. Birth-year edits do
    /// not fire this.
    async fn author_added<'ctx>(&self, ctx: &Context<'ctx>) -> impl Stream<Item = Author> + 'ctx {
        let hub = ctx.data_unchecked::<EventHub>();

        BroadcastStream::new(hub.subscribe()).filter_map(|result| {
            result.ok().and_then(|event| match event {
                CatalogEvent::AuthorAdded(view) => Some(Author::from(view)),
                _ => None,
            })
        })
    }
}
