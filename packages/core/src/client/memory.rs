//! In-Memory Catalog
//!
//! A [`TransportClient`] backed by in-memory sequences. It follows the wire
//! contract exactly: pages are sliced by `elementStart` / `maxElements`,
//! unknown identifiers produce `UNRECOGNIZED_REFERENCE` envelopes, and
//! restricted assets reject other users with `UNAUTHORIZED`.
//!
//! Every call is recorded so callers can assert how many round trips an
//! access pattern costs. Failures can be injected as wire envelopes and are
//! returned by the next call, whichever it is.
//!
//! # Examples
//!
//! ```rust
//! use assetgraph_core::client::InMemoryCatalog;
//! use assetgraph_core::models::Category;
//! use serde_json::json;
//!
//! # fn main() -> assetgraph_core::client::Result<()> {
//! let mut catalog = InMemoryCatalog::new();
//! catalog.add_asset("a-1", "db.patients").push_elements(
//!     "a-1",
//!     Category::Licenses,
//!     None,
//!     vec![json!({ "name": "CC-BY-4.0" })],
//! )?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::error::{ErrorEnvelope, ExceptionKind, ReferenceKind, Result, RetrievalError};
use super::transport::{AssetSummary, PageRequest, TransportClient};
use crate::models::{AssetHeader, Category, ElementHeader, ScopeContext};

/// One call received by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Summary { asset_id: String },
    Page(PageRequest),
}

type SequenceKey = (Category, Option<String>);

#[derive(Debug)]
struct StoredAsset {
    header: AssetHeader,
    schema_type: Option<Value>,
    sequences: HashMap<SequenceKey, Vec<Value>>,
    /// `None` means every user may read the asset
    readers: Option<HashSet<String>>,
}

/// In-memory remote catalog with call recording and failure injection
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    assets: RwLock<HashMap<String, StoredAsset>>,
    connections: RwLock<HashSet<String>>,
    calls: Mutex<Vec<RecordedCall>>,
    pending_failures: Mutex<VecDeque<ErrorEnvelope>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset with a minimal header
    pub fn add_asset(&mut self, asset_id: &str, qualified_name: &str) -> &mut Self {
        let header = AssetHeader {
            element: ElementHeader {
                guid: asset_id.to_string(),
                type_name: "Asset".to_string(),
                created_by: None,
                create_time: Some(chrono::Utc::now()),
                update_time: None,
                version: 1,
                additional_properties: HashMap::new(),
            },
            qualified_name: qualified_name.to_string(),
            display_name: None,
            description: None,
            owner: None,
            zone_membership: Vec::new(),
        };
        self.add_asset_with_header(asset_id, header)
    }

    /// Register an asset with a full header
    pub fn add_asset_with_header(&mut self, asset_id: &str, header: AssetHeader) -> &mut Self {
        self.assets.get_mut().insert(
            asset_id.to_string(),
            StoredAsset {
                header,
                schema_type: None,
                sequences: HashMap::new(),
                readers: None,
            },
        );
        self
    }

    /// Register a connection identifier that scopes may refer to
    pub fn add_connection(&mut self, connection_id: &str) -> &mut Self {
        self.connections.get_mut().insert(connection_id.to_string());
        self
    }

    /// Embed a top-level schema type bean in the asset's summary
    ///
    /// # Errors
    ///
    /// `UnrecognizedReference` if the asset was not added first.
    pub fn set_schema_type(&mut self, asset_id: &str, bean: Value) -> Result<&mut Self> {
        self.asset_mut(asset_id)?.schema_type = Some(bean);
        Ok(self)
    }

    /// Restrict reads of an asset to the given users
    pub fn restrict_readers<I, S>(&mut self, asset_id: &str, users: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset_mut(asset_id)?.readers = Some(users.into_iter().map(Into::into).collect());
        Ok(self)
    }

    /// Append beans to a category sequence, assigning a `guid` where missing
    ///
    /// Top-level sequences (`parent_id == None`) are counted in the summary.
    ///
    /// # Errors
    ///
    /// `UnrecognizedReference` if the asset was not added first.
    pub fn push_elements<I>(
        &mut self,
        asset_id: &str,
        category: Category,
        parent_id: Option<&str>,
        beans: I,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let sequence = self
            .asset_mut(asset_id)?
            .sequences
            .entry((category, parent_id.map(str::to_string)))
            .or_default();
        sequence.extend(beans.into_iter().map(with_guid));
        Ok(self)
    }

    /// Remove the last `count` elements of a sequence, simulating remote deletes
    pub fn truncate_elements(
        &mut self,
        asset_id: &str,
        category: Category,
        parent_id: Option<&str>,
        count: usize,
    ) -> Result<&mut Self> {
        if let Some(sequence) = self
            .asset_mut(asset_id)?
            .sequences
            .get_mut(&(category, parent_id.map(str::to_string)))
        {
            let keep = sequence.len().saturating_sub(count);
            sequence.truncate(keep);
        }
        Ok(self)
    }

    /// Fail the next call with this envelope
    pub async fn fail_next(&self, envelope: ErrorEnvelope) {
        self.pending_failures.lock().await.push_back(envelope);
    }

    /// Every call received so far, in order
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Page requests received so far, in order
    pub async fn page_requests(&self) -> Vec<PageRequest> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Page(request) => Some(request.clone()),
                RecordedCall::Summary { .. } => None,
            })
            .collect()
    }

    pub async fn clear_calls(&self) {
        self.calls.lock().await.clear();
    }

    fn asset_mut(&mut self, asset_id: &str) -> Result<&mut StoredAsset> {
        self.assets
            .get_mut()
            .get_mut(asset_id)
            .ok_or_else(|| RetrievalError::unrecognized_reference(ReferenceKind::Asset, asset_id))
    }

    async fn record(&self, call: RecordedCall) -> Result<()> {
        self.calls.lock().await.push(call);
        match self.pending_failures.lock().await.pop_front() {
            Some(envelope) => Err(envelope.into()),
            None => Ok(()),
        }
    }

    async fn check_connection(&self, scope: &ScopeContext) -> Result<()> {
        match &scope.connection_id {
            Some(id) if !self.connections.read().await.contains(id) => Err(unrecognized(
                ReferenceKind::Connection,
                id,
                "connection is not known to this catalog",
            )),
            _ => Ok(()),
        }
    }
}

fn with_guid(mut bean: Value) -> Value {
    if let Value::Object(fields) = &mut bean {
        fields
            .entry("guid")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
    }
    bean
}

fn unrecognized(kind: ReferenceKind, id: &str, message: &str) -> RetrievalError {
    ErrorEnvelope::new(ExceptionKind::UnrecognizedReference, message)
        .with_property("referenceKind", kind.to_string())
        .with_property("referenceId", id)
        .into()
}

fn check_reader(asset: &StoredAsset, scope: &ScopeContext) -> Result<()> {
    match &asset.readers {
        Some(readers) if !readers.contains(&scope.user_id) => Err(ErrorEnvelope::new(
            ExceptionKind::Unauthorized,
            format!("no read access to {}", asset.header.qualified_name),
        )
        .with_property("userId", scope.user_id.clone())
        .into()),
        _ => Ok(()),
    }
}

#[async_trait]
impl TransportClient for InMemoryCatalog {
    async fn fetch_summary(&self, scope: &ScopeContext, asset_id: &str) -> Result<AssetSummary> {
        self.record(RecordedCall::Summary {
            asset_id: asset_id.to_string(),
        })
        .await?;
        self.check_connection(scope).await?;

        let assets = self.assets.read().await;
        let asset = assets
            .get(asset_id)
            .ok_or_else(|| unrecognized(ReferenceKind::Asset, asset_id, "asset not found"))?;
        check_reader(asset, scope)?;

        let counts = asset
            .sequences
            .iter()
            .filter(|((_, parent), _)| parent.is_none())
            .map(|((category, _), beans)| (category.as_str().to_string(), beans.len()))
            .collect();

        Ok(AssetSummary {
            header: asset.header.clone(),
            counts,
            schema_type: asset.schema_type.clone(),
        })
    }

    async fn fetch_page(&self, scope: &ScopeContext, request: &PageRequest) -> Result<Vec<Value>> {
        self.record(RecordedCall::Page(request.clone())).await?;
        self.check_connection(scope).await?;

        if request.max == 0 {
            return Err(ErrorEnvelope::new(
                ExceptionKind::InvalidParameter,
                "maxElements must be greater than 0",
            )
            .with_property("parameterName", "maxElements")
            .into());
        }

        let assets = self.assets.read().await;
        let asset = assets.get(&request.asset_id).ok_or_else(|| {
            unrecognized(ReferenceKind::Asset, &request.asset_id, "asset not found")
        })?;
        check_reader(asset, scope)?;

        let key = (request.category, request.parent_id.clone());
        let Some(sequence) = asset.sequences.get(&key) else {
            return match &request.parent_id {
                Some(parent_id) if request.category == Category::SchemaAttributes => Err(
                    unrecognized(ReferenceKind::Schema, parent_id, "schema type not found"),
                ),
                Some(parent_id) => Err(unrecognized(
                    ReferenceKind::Element,
                    parent_id,
                    "parent element not found",
                )),
                None => Ok(Vec::new()),
            };
        };

        Ok(sequence
            .iter()
            .skip(request.start)
            .take(request.max)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ErrorKind;
    use serde_json::json;

    fn scope() -> ScopeContext {
        ScopeContext::new("cocoMDS1", "https://localhost:9443", "erin")
    }

    fn licenses(count: usize) -> Vec<Value> {
        (0..count)
            .map(|i| json!({ "name": format!("license-{}", i) }))
            .collect()
    }

    fn page(start: usize, max: usize) -> PageRequest {
        PageRequest {
            asset_id: "a-1".to_string(),
            category: Category::Licenses,
            parent_id: None,
            start,
            max,
        }
    }

    #[test]
    fn test_pages_are_sliced_by_offset_and_limit() {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_asset("a-1", "db.patients")
            .push_elements("a-1", Category::Licenses, None, licenses(5))
            .unwrap();

        let beans = tokio_test::block_on(catalog.fetch_page(&scope(), &page(3, 10))).unwrap();
        assert_eq!(beans.len(), 2);
        assert_eq!(beans[0]["name"], "license-3");
        assert!(beans[0]["guid"].is_string());

        let past_end = tokio_test::block_on(catalog.fetch_page(&scope(), &page(9, 10))).unwrap();
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_summary_counts_top_level_sequences_only() {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_asset("a-1", "db.patients")
            .push_elements("a-1", Category::Comments, None, vec![json!({ "guid": "c-1" })])
            .unwrap()
            .push_elements("a-1", Category::Replies, Some("c-1"), vec![json!({}), json!({})])
            .unwrap();

        let summary = tokio_test::block_on(catalog.fetch_summary(&scope(), "a-1")).unwrap();
        assert_eq!(summary.count(Category::Comments), 1);
        assert_eq!(summary.count(Category::Replies), 0);
        assert_eq!(summary.header.qualified_name, "db.patients");
    }

    #[test]
    fn test_unknown_references() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_asset("a-1", "db.patients");

        let err = tokio_test::block_on(catalog.fetch_summary(&scope(), "a-404")).unwrap_err();
        assert_eq!(
            err,
            RetrievalError::unrecognized_reference(ReferenceKind::Asset, "a-404")
        );

        let err = tokio_test::block_on(
            catalog.fetch_summary(&scope().with_connection("conn-9"), "a-1"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RetrievalError::unrecognized_reference(ReferenceKind::Connection, "conn-9")
        );

        let mut request = page(0, 10);
        request.category = Category::SchemaAttributes;
        request.parent_id = Some("st-404".to_string());
        let err = tokio_test::block_on(catalog.fetch_page(&scope(), &request)).unwrap_err();
        assert_eq!(
            err,
            RetrievalError::unrecognized_reference(ReferenceKind::Schema, "st-404")
        );
    }

    #[test]
    fn test_restricted_asset_rejects_other_users() {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_asset("a-1", "db.patients")
            .restrict_readers("a-1", ["faith"])
            .unwrap();

        let err = tokio_test::block_on(catalog.fetch_summary(&scope(), "a-1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(matches!(err, RetrievalError::Unauthorized { user_id, .. } if user_id == "erin"));
    }

    #[test]
    fn test_injected_failure_applies_to_next_call_only() {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_asset("a-1", "db.patients")
            .push_elements("a-1", Category::Licenses, None, licenses(1))
            .unwrap();

        tokio_test::block_on(async {
            catalog
                .fail_next(ErrorEnvelope::new(
                    ExceptionKind::ServiceUnavailable,
                    "repository offline",
                ))
                .await;

            let err = catalog.fetch_page(&scope(), &page(0, 1)).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
            assert!(catalog.fetch_page(&scope(), &page(0, 1)).await.is_ok());
            assert_eq!(catalog.page_requests().await.len(), 2);
        });
    }

    #[test]
    fn test_populating_unknown_asset_fails() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_asset("a-1", "db.patients");

        let expected = RetrievalError::unrecognized_reference(ReferenceKind::Asset, "a-2");
        assert_eq!(
            catalog
                .push_elements("a-2", Category::Licenses, None, licenses(1))
                .unwrap_err(),
            expected
        );
        assert_eq!(
            catalog
                .set_schema_type("a-2", json!({ "kind": "primitive" }))
                .unwrap_err(),
            expected
        );
        assert_eq!(catalog.restrict_readers("a-2", ["faith"]).unwrap_err(), expected);
        assert_eq!(
            catalog
                .truncate_elements("a-2", Category::Licenses, None, 1)
                .unwrap_err(),
            expected
        );

        // The known asset is untouched and still serves an empty sequence
        let beans = tokio_test::block_on(catalog.fetch_page(&scope(), &page(0, 10))).unwrap();
        assert!(beans.is_empty());
    }
}
