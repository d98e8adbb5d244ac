//! Feedback Elements
//!
//! Comments, likes, ratings and informal tags. Comments are the only
//! recursive element here: a comment with replies carries a nested
//! collection of comments, addressed exactly like the top-level one.

use serde::{Deserialize, Serialize};

use super::element::AssetElement;
use super::handle::AssetHandle;
use super::header::ElementHeader;
use crate::services::PagedCollection;

/// Kind of comment; unrecognized values are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum CommentType {
    #[default]
    StandardComment,
    Question,
    Answer,
    Suggestion,
    UsageExperience,
    Requirement,
    Other(String),
}

impl From<String> for CommentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "STANDARD_COMMENT" => CommentType::StandardComment,
            "QUESTION" => CommentType::Question,
            "ANSWER" => CommentType::Answer,
            "SUGGESTION" => CommentType::Suggestion,
            "USAGE_EXPERIENCE" => CommentType::UsageExperience,
            "REQUIREMENT" => CommentType::Requirement,
            _ => CommentType::Other(value),
        }
    }
}

impl From<CommentType> for String {
    fn from(value: CommentType) -> Self {
        match value {
            CommentType::StandardComment => "STANDARD_COMMENT".to_string(),
            CommentType::Question => "QUESTION".to_string(),
            CommentType::Answer => "ANSWER".to_string(),
            CommentType::Suggestion => "SUGGESTION".to_string(),
            CommentType::UsageExperience => "USAGE_EXPERIENCE".to_string(),
            CommentType::Requirement => "REQUIREMENT".to_string(),
            CommentType::Other(other) => other,
        }
    }
}

/// A comment or a reply to a comment
#[derive(Debug, Clone)]
pub struct Comment {
    pub(crate) handle: AssetHandle,
    pub(crate) header: ElementHeader,
    pub comment_type: CommentType,
    pub text: String,
    pub is_public: bool,
    pub user: Option<String>,
    pub(crate) reply_count: usize,
    pub(crate) replies: Option<PagedCollection<Comment>>,
}

impl Comment {
    pub fn handle(&self) -> &AssetHandle {
        &self.handle
    }

    pub fn header(&self) -> &ElementHeader {
        &self.header
    }

    pub fn guid(&self) -> &str {
        &self.header.guid
    }

    /// Reply count reported by the server
    pub fn reply_count(&self) -> usize {
        self.reply_count
    }

    /// Replies, absent when the comment has none
    pub fn replies(&self) -> Option<&PagedCollection<Comment>> {
        self.replies.as_ref()
    }

    pub fn replies_mut(&mut self) -> Option<&mut PagedCollection<Comment>> {
        self.replies.as_mut()
    }
}

/// Star rating; unrecognized values are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum StarRating {
    #[default]
    NoRecommendation,
    OneStar,
    TwoStars,
    ThreeStars,
    FourStars,
    FiveStars,
    Other(String),
}

impl StarRating {
    /// Number of stars, `None` for no recommendation or unknown values
    pub fn stars(&self) -> Option<u8> {
        match self {
            StarRating::OneStar => Some(1),
            StarRating::TwoStars => Some(2),
            StarRating::ThreeStars => Some(3),
            StarRating::FourStars => Some(4),
            StarRating::FiveStars => Some(5),
            StarRating::NoRecommendation | StarRating::Other(_) => None,
        }
    }
}

impl From<String> for StarRating {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NO_RECOMMENDATION" => StarRating::NoRecommendation,
            "ONE_STAR" => StarRating::OneStar,
            "TWO_STARS" => StarRating::TwoStars,
            "THREE_STARS" => StarRating::ThreeStars,
            "FOUR_STARS" => StarRating::FourStars,
            "FIVE_STARS" => StarRating::FiveStars,
            _ => StarRating::Other(value),
        }
    }
}

impl From<StarRating> for String {
    fn from(value: StarRating) -> Self {
        match value {
            StarRating::NoRecommendation => "NO_RECOMMENDATION".to_string(),
            StarRating::OneStar => "ONE_STAR".to_string(),
            StarRating::TwoStars => "TWO_STARS".to_string(),
            StarRating::ThreeStars => "THREE_STARS".to_string(),
            StarRating::FourStars => "FOUR_STARS".to_string(),
            StarRating::FiveStars => "FIVE_STARS".to_string(),
            StarRating::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeProperties {
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingProperties {
    #[serde(default)]
    pub star_rating: StarRating,

    #[serde(default)]
    pub review: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformalTagProperties {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Private tags are only returned to the user who created them
    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub user: Option<String>,
}

pub type Like = AssetElement<LikeProperties>;
pub type Rating = AssetElement<RatingProperties>;
pub type InformalTag = AssetElement<InformalTagProperties>;
