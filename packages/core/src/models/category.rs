//! Metadata Categories
//!
//! A category names one facet of an asset's metadata. Top-level categories are
//! counted in the asset summary; nested categories (replies, notes, schema
//! attributes) only exist beneath a parent element.

use crate::client::RetrievalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Comments,
    Replies,
    NoteLogs,
    Notes,
    Licenses,
    Locations,
    ExternalReferences,
    ExternalIdentifiers,
    InformalTags,
    Ratings,
    Likes,
    Certifications,
    Meanings,
    SearchKeywords,
    SchemaAttributes,
}

impl Category {
    /// Categories reported in the asset summary counts
    pub const TOP_LEVEL: [Category; 12] = [
        Category::Comments,
        Category::NoteLogs,
        Category::Licenses,
        Category::Locations,
        Category::ExternalReferences,
        Category::ExternalIdentifiers,
        Category::InformalTags,
        Category::Ratings,
        Category::Likes,
        Category::Certifications,
        Category::Meanings,
        Category::SearchKeywords,
    ];

    /// Wire name, used both as the summary count key and as the path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Comments => "comments",
            Category::Replies => "replies",
            Category::NoteLogs => "noteLogs",
            Category::Notes => "notes",
            Category::Licenses => "licenses",
            Category::Locations => "locations",
            Category::ExternalReferences => "externalReferences",
            Category::ExternalIdentifiers => "externalIdentifiers",
            Category::InformalTags => "informalTags",
            Category::Ratings => "ratings",
            Category::Likes => "likes",
            Category::Certifications => "certifications",
            Category::Meanings => "meanings",
            Category::SearchKeywords => "searchKeywords",
            Category::SchemaAttributes => "schemaAttributes",
        }
    }

    /// Path segment of the parent element for nested categories
    pub fn parent_segment(&self) -> Option<&'static str> {
        match self {
            Category::Replies => Some("comments"),
            Category::Notes => Some("noteLogs"),
            Category::SchemaAttributes => Some("schemaTypes"),
            _ => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        self.parent_segment().is_some()
    }

    /// Comments, likes, ratings and informal tags are constructed as one group
    pub fn is_feedback(&self) -> bool {
        matches!(
            self,
            Category::Comments | Category::Likes | Category::Ratings | Category::InformalTags
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::TOP_LEVEL
            .iter()
            .chain([Category::Replies, Category::Notes, Category::SchemaAttributes].iter())
            .find(|category| category.as_str() == s)
            .copied()
            .ok_or_else(|| {
                RetrievalError::invalid_parameter("category", format!("unknown category '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for category in Category::TOP_LEVEL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("replies".parse::<Category>().unwrap(), Category::Replies);
        assert!("bookmarks".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_matches_wire_name() {
        let json = serde_json::to_value(Category::ExternalReferences).unwrap();
        assert_eq!(json, "externalReferences");
    }

    #[test]
    fn test_feedback_group() {
        let feedback: Vec<_> = Category::TOP_LEVEL
            .iter()
            .filter(|c| c.is_feedback())
            .collect();
        assert_eq!(feedback.len(), 4);
        assert!(!Category::NoteLogs.is_feedback());
    }

    #[test]
    fn test_nested_categories() {
        assert!(Category::Replies.is_nested());
        assert!(Category::SchemaAttributes.is_nested());
        assert!(Category::TOP_LEVEL.iter().all(|c| !c.is_nested()));
    }
}
