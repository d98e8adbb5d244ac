//! Asset Graph Retrieval Layer
//!
//! This crate materializes the metadata graph of a single remote asset
//! (comments with threaded replies, note logs with notes, licenses,
//! locations, external references, tags, ratings, likes and a recursively
//! typed schema) by issuing paginated reads against a remote catalog service.
//!
//! # Architecture
//!
//! - **One summary fetch**: `AssetGraph::construct` reads header and counts once
//! - **Windowed collections**: each category is a `PagedCollection` holding a
//!   single in-memory window, refetched on a miss
//! - **Lazy nesting**: replies, notes and schema attributes are collections
//!   themselves and are not fetched until traversed
//! - **Tagged schema types**: schema beans decode into `SchemaTypeNode`, with
//!   an explicit opaque arm for kinds added after this client
//!
//! # Modules
//!
//! - [`client`] - Transport contract, error taxonomy, in-memory catalog
//! - [`config`] - Window sizes and their sources
//! - [`models`] - Element types and asset handles
//! - [`services`] - Paged collections, element factory, schema resolver, graph

pub mod client;
pub mod config;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use client::{Result, RetrievalError, TransportClient};
pub use config::RetrievalConfig;
pub use models::*;
pub use services::{AssetGraph, PagedCollection};
