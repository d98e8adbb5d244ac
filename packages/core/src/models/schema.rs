//! Schema Type Tree
//!
//! An asset's structure is described by a tree of schema types whose shape is
//! only known once a bean arrives. Each node is one variant of
//! [`SchemaTypeNode`]:
//!
//! - `Primitive`: terminal, a single data type
//! - `Complex`: a list of attributes, fetched lazily page by page
//! - `Map`: key and value types, both resolved eagerly
//! - `Bounded`: one element type, resolved eagerly
//! - `Opaque`: any kind this client does not know; the raw bean is kept
//!
//! Attributes point at their own type, so the tree is recursive by type:
//! complex → attribute → complex → … Nested collections are owned strictly
//! downward, so no instance cycle can form.
//!
//! ## Example Bean
//!
//! ```json
//! {
//!   "kind": "map",
//!   "guid": "st-7",
//!   "qualifiedName": "patient.labels",
//!   "keyType":   { "kind": "primitive", "guid": "st-8", "qualifiedName": "label.key", "dataType": "string" },
//!   "valueType": { "kind": "primitive", "guid": "st-9", "qualifiedName": "label.value", "dataType": "int" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::handle::AssetHandle;
use super::header::ElementHeader;
use crate::services::PagedCollection;

/// Properties shared by every schema type variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTypeProperties {
    #[serde(flatten)]
    pub header: ElementHeader,

    pub qualified_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_standard: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSchemaType {
    pub properties: SchemaTypeProperties,
    pub data_type: String,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ComplexSchemaType {
    pub properties: SchemaTypeProperties,
    pub(crate) attribute_count: usize,
    pub(crate) attributes: Option<PagedCollection<SchemaAttribute>>,
}

impl ComplexSchemaType {
    pub fn attribute_count(&self) -> usize {
        self.attribute_count
    }

    /// Attributes, unfetched until traversed; absent when there are none
    pub fn attributes(&self) -> Option<&PagedCollection<SchemaAttribute>> {
        self.attributes.as_ref()
    }

    pub fn attributes_mut(&mut self) -> Option<&mut PagedCollection<SchemaAttribute>> {
        self.attributes.as_mut()
    }
}

#[derive(Debug, Clone)]
pub struct MapSchemaType {
    pub properties: SchemaTypeProperties,
    pub key_type: Box<SchemaTypeNode>,
    pub value_type: Box<SchemaTypeNode>,
}

/// Array-like type with a single element type
#[derive(Debug, Clone)]
pub struct BoundedSchemaType {
    pub properties: SchemaTypeProperties,
    /// `None` when unbounded
    pub maximum_elements: Option<u64>,
    pub element_type: Box<SchemaTypeNode>,
}

/// A schema type of a kind this client does not model
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueSchemaType {
    /// Declared discriminator, if the bean had one
    pub kind: Option<String>,
    pub bean: Value,
}

/// One node of a resolved schema type tree
#[derive(Debug, Clone)]
pub enum SchemaTypeNode {
    Primitive(PrimitiveSchemaType),
    Complex(ComplexSchemaType),
    Map(MapSchemaType),
    Bounded(BoundedSchemaType),
    Opaque(OpaqueSchemaType),
}

impl SchemaTypeNode {
    /// Variant name, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaTypeNode::Primitive(_) => "primitive",
            SchemaTypeNode::Complex(_) => "complex",
            SchemaTypeNode::Map(_) => "map",
            SchemaTypeNode::Bounded(_) => "bounded",
            SchemaTypeNode::Opaque(_) => "opaque",
        }
    }

    /// Shared properties; opaque nodes have none decoded
    pub fn properties(&self) -> Option<&SchemaTypeProperties> {
        match self {
            SchemaTypeNode::Primitive(t) => Some(&t.properties),
            SchemaTypeNode::Complex(t) => Some(&t.properties),
            SchemaTypeNode::Map(t) => Some(&t.properties),
            SchemaTypeNode::Bounded(t) => Some(&t.properties),
            SchemaTypeNode::Opaque(_) => None,
        }
    }

    pub fn guid(&self) -> Option<&str> {
        match self {
            SchemaTypeNode::Opaque(t) => t.bean.get("guid").and_then(Value::as_str),
            _ => self.properties().map(|p| p.header.guid.as_str()),
        }
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.properties().map(|p| p.qualified_name.as_str())
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, SchemaTypeNode::Opaque(_))
    }
}

/// Reference to a schema type defined elsewhere, kept without resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaLink {
    pub guid: String,

    #[serde(default)]
    pub link_name: Option<String>,

    #[serde(default)]
    pub linked_type_guid: Option<String>,

    #[serde(default)]
    pub linked_type_qualified_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Type of a schema attribute: resolved inline, or an external link
#[derive(Debug, Clone)]
pub enum AttributeType {
    Inline(SchemaTypeNode),
    Link(SchemaLink),
}

/// One attribute of a complex schema type
#[derive(Debug, Clone)]
pub struct SchemaAttribute {
    pub(crate) handle: AssetHandle,
    pub(crate) header: ElementHeader,
    pub name: String,
    pub qualified_name: Option<String>,
    pub description: Option<String>,
    /// Position within the parent type
    pub position: u32,
    pub min_cardinality: u32,
    /// `None` when unbounded
    pub max_cardinality: Option<u32>,
    pub is_nullable: bool,
    pub default_value: Option<String>,
    pub(crate) attribute_type: Option<AttributeType>,
}

impl SchemaAttribute {
    pub fn handle(&self) -> &AssetHandle {
        &self.handle
    }

    pub fn header(&self) -> &ElementHeader {
        &self.header
    }

    pub fn guid(&self) -> &str {
        &self.header.guid
    }

    pub fn attribute_type(&self) -> Option<&AttributeType> {
        self.attribute_type.as_ref()
    }

    pub fn attribute_type_mut(&mut self) -> Option<&mut AttributeType> {
        self.attribute_type.as_mut()
    }

    /// Inline schema type, if the attribute was not defined by link
    pub fn schema_type(&self) -> Option<&SchemaTypeNode> {
        match &self.attribute_type {
            Some(AttributeType::Inline(node)) => Some(node),
            _ => None,
        }
    }

    pub fn schema_type_mut(&mut self) -> Option<&mut SchemaTypeNode> {
        match &mut self.attribute_type {
            Some(AttributeType::Inline(node)) => Some(node),
            _ => None,
        }
    }

    pub fn link(&self) -> Option<&SchemaLink> {
        match &self.attribute_type {
            Some(AttributeType::Link(link)) => Some(link),
            _ => None,
        }
    }
}
