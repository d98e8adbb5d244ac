//! TransportClient Trait - Remote Catalog Abstraction
//!
//! The retrieval layer consumes exactly two remote reads:
//!
//! - **Paged read**: `GET .../assets/{assetId}/{category}?elementStart={n}&maxElements={m}`
//!   returning `{ items: [...] }`
//! - **Summary read**: `GET .../assets/{assetId}` returning
//!   `{ header, counts: { category → int }, schemaType?: <bean> }`
//!
//! The concrete wire transport and authentication mechanism live behind this
//! trait. Implementations decode the response bodies, translate error
//! envelopes with `RetrievalError::from(envelope)`, and own any retry or
//! timeout policy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::error::{ErrorEnvelope, Result};
use crate::models::{AssetHeader, Category, ScopeContext};

/// One paged read against a category of an asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub asset_id: String,

    pub category: Category,

    /// Parent element for nested categories (comment, note log, schema type)
    pub parent_id: Option<String>,

    /// Offset of the first element (`elementStart`)
    pub start: usize,

    /// Maximum number of elements to return (`maxElements`)
    pub max: usize,
}

impl PageRequest {
    /// Relative request path including the paging query
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use assetgraph_core::client::PageRequest;
    /// # use assetgraph_core::models::Category;
    /// let request = PageRequest {
    ///     asset_id: "a-1".to_string(),
    ///     category: Category::Replies,
    ///     parent_id: Some("c-9".to_string()),
    ///     start: 25,
    ///     max: 25,
    /// };
    /// assert_eq!(
    ///     request.path(),
    ///     "assets/a-1/comments/c-9/replies?elementStart=25&maxElements=25"
    /// );
    /// ```
    pub fn path(&self) -> String {
        let resource = match (self.category.parent_segment(), &self.parent_id) {
            (Some(parent_segment), Some(parent_id)) => format!(
                "assets/{}/{}/{}/{}",
                self.asset_id, parent_segment, parent_id, self.category
            ),
            _ => format!("assets/{}/{}", self.asset_id, self.category),
        };
        format!(
            "{}?elementStart={}&maxElements={}",
            resource, self.start, self.max
        )
    }
}

/// Body of a paged read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub items: Vec<Value>,
}

impl PageResponse {
    /// Decode a paged read body into its raw beans
    ///
    /// A body carrying `exceptionKind` is an error envelope and is translated
    /// into the matching `RetrievalError`.
    ///
    /// # Errors
    ///
    /// - the mapped envelope error when the service rejected the read
    /// - `ServiceUnavailable` when the body is not valid JSON or has the wrong shape
    pub fn decode(body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)?;
        if value.get("exceptionKind").is_some() {
            let envelope: ErrorEnvelope = serde_json::from_value(value)?;
            return Err(envelope.into());
        }
        let page: PageResponse = serde_json::from_value(value)?;
        Ok(page.items)
    }
}

/// Summary envelope for one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub header: AssetHeader,

    /// Element count per category wire name
    #[serde(default)]
    pub counts: HashMap<String, usize>,

    /// Top-level schema type bean, if the asset has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<Value>,
}

impl AssetSummary {
    /// Count reported for a category; absent keys count as zero
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(category.as_str()).copied().unwrap_or(0)
    }

    /// Counts keyed by known category; unknown keys are ignored
    pub fn category_counts(&self) -> HashMap<Category, usize> {
        Category::TOP_LEVEL
            .iter()
            .map(|category| (*category, self.count(*category)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Opaque fetch primitive against the remote catalog service
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one transport is shared by every
/// collection of every graph built from it.
///
/// # Errors
///
/// Both methods fail with exactly one of the four `RetrievalError` kinds.
/// An empty page is a valid result meaning "no more data", never an error.
///
/// # Implementing
///
/// A transport serving canned response bodies, keyed by request path:
///
/// ```rust
/// # use assetgraph_core::client::{
/// #     AssetSummary, PageRequest, PageResponse, ReferenceKind, Result, RetrievalError,
/// #     TransportClient,
/// # };
/// # use assetgraph_core::models::{Category, ScopeContext};
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use std::collections::HashMap;
///
/// struct RecordedBodies {
///     bodies: HashMap<String, String>,
/// }
///
/// impl RecordedBodies {
///     fn body(&self, path: &str) -> Result<&str> {
///         self.bodies
///             .get(path)
///             .map(String::as_str)
///             .ok_or_else(|| RetrievalError::service_unavailable(format!("no body for {}", path)))
///     }
/// }
///
/// #[async_trait]
/// impl TransportClient for RecordedBodies {
///     async fn fetch_summary(&self, _scope: &ScopeContext, asset_id: &str) -> Result<AssetSummary> {
///         let body = self.body(&format!("assets/{}", asset_id))?;
///         Ok(serde_json::from_str(body)?)
///     }
///
///     async fn fetch_page(&self, _scope: &ScopeContext, request: &PageRequest) -> Result<Vec<Value>> {
///         PageResponse::decode(self.body(&request.path())?)
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let mut bodies = HashMap::new();
/// bodies.insert(
///     "assets/a-1/licenses?elementStart=0&maxElements=2".to_string(),
///     r#"{ "items": [{ "name": "MIT" }, { "name": "Apache-2.0" }] }"#.to_string(),
/// );
/// bodies.insert(
///     "assets/a-2/licenses?elementStart=0&maxElements=2".to_string(),
///     r#"{
///         "exceptionKind": "UNRECOGNIZED_REFERENCE",
///         "message": "asset a-2 is not known",
///         "properties": { "referenceKind": "asset", "referenceId": "a-2" }
///     }"#
///     .to_string(),
/// );
/// let transport = RecordedBodies { bodies };
/// let scope = ScopeContext::new("cocoMDS1", "https://localhost:9443", "erinoverview");
///
/// let mut request = PageRequest {
///     asset_id: "a-1".to_string(),
///     category: Category::Licenses,
///     parent_id: None,
///     start: 0,
///     max: 2,
/// };
/// assert_eq!(transport.fetch_page(&scope, &request).await.unwrap().len(), 2);
///
/// request.asset_id = "a-2".to_string();
/// assert_eq!(
///     transport.fetch_page(&scope, &request).await.unwrap_err(),
///     RetrievalError::unrecognized_reference(ReferenceKind::Asset, "a-2")
/// );
/// # });
/// ```
#[async_trait]
pub trait TransportClient: Send + Sync {
    /// Fetch the summary envelope of one asset
    async fn fetch_summary(&self, scope: &ScopeContext, asset_id: &str) -> Result<AssetSummary>;

    /// Fetch one ordered page of raw element beans
    async fn fetch_page(&self, scope: &ScopeContext, request: &PageRequest) -> Result<Vec<Value>>;
}
