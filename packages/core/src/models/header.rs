//! Element and Asset Headers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Common header carried by every element bean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementHeader {
    /// Unique identifier assigned by the metadata server
    pub guid: String,

    /// Open metadata type name (e.g., "Comment", "License")
    #[serde(default)]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,

    /// Server-side version counter
    #[serde(default)]
    pub version: i64,

    /// Properties defined by subtypes this client does not model
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_properties: HashMap<String, Value>,
}

/// Header of the asset itself, returned once in the summary envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHeader {
    #[serde(flatten)]
    pub element: ElementHeader,

    pub qualified_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Governance zones the asset belongs to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_membership: Vec<String>,
}

impl AssetHeader {
    pub fn guid(&self) -> &str {
        &self.element.guid
    }

    /// Display name, falling back to the qualified name
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.qualified_name)
    }
}
