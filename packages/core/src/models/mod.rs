//! Data Models
//!
//! This module contains the element types materialized from an asset's
//! metadata graph:
//!
//! - `AssetHandle` / `ScopeContext` - Non-owning back-reference to the asset
//! - `Category` - Named facets of an asset's metadata
//! - Feedback, note, reference and schema elements
//!
//! Elements are built from raw wire beans by the element factory in
//! [`crate::services`]; the types here carry no fetch logic of their own.

mod category;
mod element;
mod feedback;
mod handle;
mod header;
mod notes;
mod reference;
pub mod schema;

pub use category::Category;
pub use element::AssetElement;
pub use feedback::{
    Comment, CommentType, InformalTag, InformalTagProperties, Like, LikeProperties, Rating,
    RatingProperties, StarRating,
};
pub use handle::{AssetHandle, ScopeContext};
pub use header::{AssetHeader, ElementHeader};
pub use notes::{Note, NoteLog, NoteProperties};
pub use reference::{
    Certification, CertificationProperties, ExternalIdentifier, ExternalIdentifierProperties,
    ExternalReference, ExternalReferenceProperties, License, LicenseProperties, Location,
    LocationProperties, Meaning, MeaningProperties, SearchKeyword, SearchKeywordProperties,
};
pub use schema::{
    AttributeType, BoundedSchemaType, ComplexSchemaType, MapSchemaType, OpaqueSchemaType,
    PrimitiveSchemaType, SchemaAttribute, SchemaLink, SchemaTypeNode, SchemaTypeProperties,
};
