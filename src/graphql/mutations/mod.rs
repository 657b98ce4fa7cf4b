pub mod auth;
pub mod books;

pub use auth::AuthMutations;
pub use books::CatalogMutations;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, ErrorExtensions, Object, Result};

    pub(crate) use crate::catalog::{CatalogService, NewBook};
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::AuthService;
}
