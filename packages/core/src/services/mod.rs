//! Retrieval Services
//!
//! This module contains the lazy materialization logic:
//!
//! - `PagedCollection` - Cached, windowed view over one category
//! - `element_factory` - Per-category translation of raw beans into elements
//! - `SchemaTypeResolver` - Polymorphic, recursive schema type resolution
//! - `AssetGraph` - Root aggregator built from one summary fetch
//!
//! Services coordinate between the transport layer and callers; every remote
//! read goes through the `TransportClient` held by a `CollectionContext`.

pub mod asset_graph;
pub mod element_factory;
pub mod paged_collection;
pub mod schema_resolver;

pub use asset_graph::AssetGraph;
pub use element_factory::{Element, FlatProperties};
pub use paged_collection::{CollectionContext, PagedCollection};
pub use schema_resolver::{SchemaKind, SchemaTypeResolver};
