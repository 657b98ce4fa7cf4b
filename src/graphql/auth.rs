//! Request authentication context for GraphQL operations.
//!
//! The HTTP and WebSocket handlers verify the bearer token up front and,
//! when it checks out, insert an [`AuthUser`] into the request data. An
//! absent or invalid token just means the request runs unauthenticated:
//! queries proceed, and mutations that need a caller fail in the
//! catalog core, which checks before any validation or existence lookup.

use async_graphql::Context;

pub use crate::services::auth::AuthUser;

/// Extension trait to get the authenticated caller from GraphQL context.
pub trait AuthExt {
    /// The authenticated caller if present, or None.
    fn try_auth_user(&self) -> Option<&AuthUser>;
}

impl AuthExt for Context<'_> {
    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }
}
