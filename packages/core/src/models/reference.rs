//! Reference Elements
//!
//! Licenses, certifications, locations, external references and identifiers,
//! glossary meanings and search keywords. All are flat: no nested collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::element::AssetElement;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseProperties {
    /// Name of the license type (e.g., "Apache-2.0")
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub licensee: Option<String>,

    #[serde(default)]
    pub licensor: Option<String>,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub conditions: Option<String>,
}

impl LicenseProperties {
    /// Whether the license covers `at` (open-ended dates always match)
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start_date.map_or(true, |start| start <= at)
            && self.end_date.map_or(true, |end| at < end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationProperties {
    pub certification_type_name: String,

    #[serde(default)]
    pub examiner: Option<String>,

    #[serde(default)]
    pub certified_by: Option<String>,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationProperties {
    pub qualified_name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReferenceProperties {
    /// Identifier of the reference as linked from this asset
    pub reference_id: String,

    #[serde(default)]
    pub link_description: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub uri: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Version of the referenced resource
    #[serde(default)]
    pub reference_version: Option<String>,

    #[serde(default)]
    pub organization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdentifierProperties {
    /// Identifier used by the external system
    pub identifier: String,

    #[serde(default)]
    pub identifier_description: Option<String>,

    /// Pattern used to construct the identifier (e.g., "LOCAL_KEY")
    #[serde(default)]
    pub key_pattern: Option<String>,

    /// Qualified name of the external system
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeaningProperties {
    /// Glossary term name
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchKeywordProperties {
    pub keyword: String,

    #[serde(default)]
    pub description: Option<String>,
}

pub type License = AssetElement<LicenseProperties>;
pub type Certification = AssetElement<CertificationProperties>;
pub type Location = AssetElement<LocationProperties>;
pub type ExternalReference = AssetElement<ExternalReferenceProperties>;
pub type ExternalIdentifier = AssetElement<ExternalIdentifierProperties>;
pub type Meaning = AssetElement<MeaningProperties>;
pub type SearchKeyword = AssetElement<SearchKeywordProperties>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_license_activity_window() {
        let license: LicenseProperties = serde_json::from_value(json!({
            "name": "CC-BY-4.0",
            "startDate": "2024-01-01T00:00:00Z",
            "endDate": "2025-01-01T00:00:00Z"
        }))
        .unwrap();

        let inside = "2024-06-01T00:00:00Z".parse().unwrap();
        let after = "2025-01-01T00:00:00Z".parse().unwrap();
        assert!(license.is_active_at(inside));
        assert!(!license.is_active_at(after));
    }

    #[test]
    fn test_open_ended_license_is_always_active() {
        let license: LicenseProperties =
            serde_json::from_value(json!({ "name": "Internal use" })).unwrap();
        assert!(license.is_active_at(Utc::now()));
    }
}
