//! Libris — GraphQL book catalog backend.
//!
//! The catalog core lives in [`catalog`]; storage is abstracted behind
//! the [`db::CatalogStore`] trait, authentication and event fan-out live
//! in [`services`], and the GraphQL surface in [`graphql`].

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod services;
