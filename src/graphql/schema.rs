//! GraphQL schema assembly.

use std::sync::Arc;

use async_graphql::{MergedObject, Schema};

use crate::catalog::CatalogService;
use crate::services::{AuthService, EventHub};

use super::mutations::{AuthMutations, CatalogMutations};
use super::queries::{AuthorQueries, BookQueries, UserQueries};
use super::subscriptions::SubscriptionRoot;

/// The GraphQL schema type
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(BookQueries, AuthorQueries, UserQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(CatalogMutations, AuthMutations);

/// Build the schema with all resolvers and shared services
pub fn build_schema(
    catalog: Arc<CatalogService>,
    auth: Arc<AuthService>,
    events: EventHub,
) -> CatalogSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(catalog)
    .data(auth)
    .data(events)
    .finish()
}
