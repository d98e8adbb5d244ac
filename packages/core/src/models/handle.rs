//! Scope Context and Asset Handles
//!
//! Every materialized element points back at its owning asset through an
//! [`AssetHandle`]: the asset identifier plus the shared, read-only
//! [`ScopeContext`] needed to repeat a fetch. The handle never owns the graph,
//! so nested structures (attribute → schema → attribute …) cannot form cycles.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::client::{Result, RetrievalError};

/// Server and caller identity required to repeat any fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeContext {
    /// Name of the metadata server holding the asset
    pub server_name: String,

    /// Root URL of the platform hosting the server
    pub platform_url: String,

    /// Calling user identity
    pub user_id: String,

    /// Connection the asset was reached through, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
}

impl ScopeContext {
    pub fn new(
        server_name: impl Into<String>,
        platform_url: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            platform_url: platform_url.into(),
            user_id: user_id.into(),
            connection_id: None,
        }
    }

    /// Scope the requests to the connection used to locate the asset
    pub fn with_connection(mut self, connection_id: impl Into<String>) -> Self {
        self.connection_id = Some(connection_id.into());
        self
    }

    /// Reject blank identifiers before any network call
    pub fn validate(&self) -> Result<()> {
        if self.server_name.trim().is_empty() {
            return Err(RetrievalError::invalid_parameter(
                "server_name",
                "must not be blank",
            ));
        }
        if self.user_id.trim().is_empty() {
            return Err(RetrievalError::invalid_parameter("user_id", "must not be blank"));
        }
        if matches!(&self.connection_id, Some(id) if id.trim().is_empty()) {
            return Err(RetrievalError::invalid_parameter(
                "connection_id",
                "must not be blank when present",
            ));
        }
        Ok(())
    }
}

/// Non-owning reference from an element back to its asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    asset_id: Arc<str>,
    scope: Arc<ScopeContext>,
}

impl AssetHandle {
    pub fn new(asset_id: impl Into<Arc<str>>, scope: Arc<ScopeContext>) -> Self {
        Self {
            asset_id: asset_id.into(),
            scope,
        }
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn scope(&self) -> &ScopeContext {
        &self.scope
    }
}
