//! Long-lived services owned by the server process.

pub mod auth;
pub mod events;

pub use auth::{AuthConfig, AuthService, AuthUser, TokenClaims};
pub use events::{CatalogEvent, DEFAULT_EVENT_CAPACITY, EventHub};
