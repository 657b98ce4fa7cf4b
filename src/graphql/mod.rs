//! GraphQL API with subscriptions for real-time updates.
//!
//! Queries and mutations are split into domain modules, each defining a
//! `#[derive(Default)]` struct with an `#[Object]` impl; `schema.rs`
//! merges them into the roots with `MergedObject`. Subscriptions go over
//! WebSocket at /graphql/ws.

pub mod auth;
pub mod mutations;
pub mod queries;
mod schema;
mod subscriptions;
pub mod types;

pub use auth::{AuthExt, AuthUser};
pub use schema::{CatalogSchema, build_schema};
