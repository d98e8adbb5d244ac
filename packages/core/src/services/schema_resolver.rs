//! Schema Type Resolution
//!
//! Translates a raw schema-type bean into a [`SchemaTypeNode`]. The bean's
//! shape is unknown until its `kind` discriminator is read; the discriminator
//! is decoded once into [`SchemaKind`] and every branch below is an explicit
//! arm, including the opaque fallback.
//!
//! # Lazy vs. Eager
//!
//! - Complex types may have any number of attributes, so their attributes
//!   become a lazy [`PagedCollection`] and nothing is fetched here.
//! - Map (two children) and bounded (one child) types embed their children in
//!   the bean and have statically bounded fan-out, so they are resolved
//!   immediately. Resolution never performs a network call.
//!
//! # Forward Compatibility
//!
//! A missing or unrecognized discriminator yields `SchemaTypeNode::Opaque`
//! carrying the raw bean. It is never an error. A recognized discriminator
//! whose body does not decode is a decode failure (`ServiceUnavailable`).

use serde::Deserialize;
use serde_json::Value;

use crate::client::Result;
use crate::models::schema::{
    BoundedSchemaType, ComplexSchemaType, MapSchemaType, OpaqueSchemaType, PrimitiveSchemaType,
    SchemaTypeNode, SchemaTypeProperties,
};
use crate::models::Category;
use crate::services::element_factory::nested_collection;
use crate::services::paged_collection::CollectionContext;

/// Name of the discriminator field in schema type beans
pub const KIND_FIELD: &str = "kind";

/// Decoded schema type discriminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    Primitive,
    Complex,
    Map,
    Bounded,
    Unknown(Option<String>),
}

impl SchemaKind {
    /// Read the discriminator of a bean
    pub fn of(bean: &Value) -> Self {
        match bean.get(KIND_FIELD).and_then(Value::as_str) {
            Some("primitive") => SchemaKind::Primitive,
            Some("complex") => SchemaKind::Complex,
            Some("map") => SchemaKind::Map,
            Some("bounded") => SchemaKind::Bounded,
            other => SchemaKind::Unknown(other.map(str::to_string)),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrimitiveBean {
    #[serde(flatten)]
    properties: SchemaTypeProperties,
    data_type: String,
    #[serde(default)]
    default_value: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComplexBean {
    #[serde(flatten)]
    properties: SchemaTypeProperties,
    #[serde(default)]
    attribute_count: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapBean {
    #[serde(flatten)]
    properties: SchemaTypeProperties,
    key_type: Value,
    value_type: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundedBean {
    #[serde(flatten)]
    properties: SchemaTypeProperties,
    /// Zero or absent means unbounded
    #[serde(default)]
    maximum_elements: Option<u64>,
    element_type: Value,
}

/// Resolves schema type beans within one asset's collection context
pub struct SchemaTypeResolver<'a> {
    context: &'a CollectionContext,
}

impl<'a> SchemaTypeResolver<'a> {
    pub fn new(context: &'a CollectionContext) -> Self {
        Self { context }
    }

    /// Resolve one bean into a schema type node
    ///
    /// # Errors
    ///
    /// `ServiceUnavailable` if a bean with a recognized kind is malformed.
    /// Unrecognized kinds never fail.
    pub fn resolve(&self, bean: Value) -> Result<SchemaTypeNode> {
        match SchemaKind::of(&bean) {
            SchemaKind::Primitive => {
                let bean: PrimitiveBean = serde_json::from_value(bean)?;
                Ok(SchemaTypeNode::Primitive(PrimitiveSchemaType {
                    properties: bean.properties,
                    data_type: bean.data_type,
                    default_value: bean.default_value,
                }))
            }
            SchemaKind::Complex => {
                let bean: ComplexBean = serde_json::from_value(bean)?;
                let attributes = nested_collection(
                    self.context,
                    Category::SchemaAttributes,
                    &bean.properties.header.guid,
                    bean.attribute_count,
                );
                Ok(SchemaTypeNode::Complex(ComplexSchemaType {
                    properties: bean.properties,
                    attribute_count: bean.attribute_count,
                    attributes,
                }))
            }
            SchemaKind::Map => {
                let bean: MapBean = serde_json::from_value(bean)?;
                let key_type = self.resolve(bean.key_type)?;
                let value_type = self.resolve(bean.value_type)?;
                Ok(SchemaTypeNode::Map(MapSchemaType {
                    properties: bean.properties,
                    key_type: Box::new(key_type),
                    value_type: Box::new(value_type),
                }))
            }
            SchemaKind::Bounded => {
                let bean: BoundedBean = serde_json::from_value(bean)?;
                let element_type = self.resolve(bean.element_type)?;
                Ok(SchemaTypeNode::Bounded(BoundedSchemaType {
                    properties: bean.properties,
                    maximum_elements: bean.maximum_elements.filter(|max| *max > 0),
                    element_type: Box::new(element_type),
                }))
            }
            SchemaKind::Unknown(kind) => {
                tracing::warn!(
                    kind = kind.as_deref().unwrap_or("<missing>"),
                    "Unrecognized schema type kind for asset {}, keeping raw bean",
                    self.context.handle().asset_id()
                );
                Ok(SchemaTypeNode::Opaque(OpaqueSchemaType { kind, bean }))
            }
        }
    }
}
