//! Paged Collections
//!
//! A [`PagedCollection`] is a cached, windowed view into one category of a
//! remote sequence. Only one window of elements is held in memory; touching an
//! index outside it replaces the whole window with a fresh page fetched at that
//! index.
//!
//! # Access Pattern
//!
//! Windows start at the requested index, so a forward scan misses exactly once
//! per window boundary: a collection of 250 elements with a window of 100 is
//! read with fetches at offsets 0, 100 and 200. Random access is supported but
//! every miss costs a round trip.
//!
//! # Independent Traversal
//!
//! Accessors on the owning graph return the same collection every time, so a
//! traversal position survives across calls. `clone()` produces a collection
//! with the same scope and total but an empty window and a rewound cursor; it
//! never shares window state with its source.
//!
//! # Failure Model
//!
//! A page is built completely before it is installed. A transport or decode
//! failure leaves the previous window untouched and is returned to the caller.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::client::{PageRequest, Result, RetrievalError, TransportClient};
use crate::config::RetrievalConfig;
use crate::models::{AssetHandle, Category};
use crate::services::element_factory::Element;

/// Everything a collection needs to refetch, shared by all collections of a graph
#[derive(Clone)]
pub struct CollectionContext {
    handle: AssetHandle,
    transport: Arc<dyn TransportClient>,
    config: RetrievalConfig,
}

impl CollectionContext {
    pub fn new(
        handle: AssetHandle,
        transport: Arc<dyn TransportClient>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            handle,
            transport,
            config,
        }
    }

    pub fn handle(&self) -> &AssetHandle {
        &self.handle
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn TransportClient> {
        &self.transport
    }
}

impl fmt::Debug for CollectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionContext")
            .field("handle", &self.handle)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Cached, windowed, forward-biased view over one category of an asset
pub struct PagedCollection<T> {
    context: CollectionContext,
    category: Category,
    parent_id: Option<String>,
    total: usize,
    page_size: usize,
    window_start: usize,
    window: Vec<T>,
    position: usize,
}

impl<T> PagedCollection<T> {
    /// Build an unpopulated collection; nothing is fetched until first access
    ///
    /// The window size comes from the context's config for `category` and is
    /// never less than one.
    pub fn new(
        context: CollectionContext,
        category: Category,
        parent_id: Option<String>,
        total: usize,
    ) -> Self {
        let page_size = context.config.page_size_for(category).max(1);
        Self {
            context,
            category,
            parent_id,
            total,
            page_size,
            window_start: 0,
            window: Vec::new(),
            position: 0,
        }
    }

    /// Element count reported by the server when the collection was built
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Parent element of a nested collection
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Maximum window size (W)
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn handle(&self) -> &AssetHandle {
        &self.context.handle
    }

    /// Indices currently held in memory
    pub fn window_range(&self) -> Range<usize> {
        self.window_start..self.window_start + self.window.len()
    }

    /// Cursor position used by [`next_element`](Self::next_element)
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_next(&self) -> bool {
        self.position < self.total
    }

    fn window_contains(&self, index: usize) -> bool {
        self.window_range().contains(&index)
    }
}

impl<T: Element> PagedCollection<T> {
    /// Element at `index`, fetching a new window on a miss
    ///
    /// Returns `Ok(None)` when the server has no element at `index` any more
    /// (the remote sequence shrank after the count was reported).
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `index >= total()`; no fetch is made
    /// - any transport failure, unchanged
    /// - `ServiceUnavailable` if a bean in the page does not decode
    pub async fn get(&mut self, index: usize) -> Result<Option<&T>> {
        if !self.load_window(index).await? {
            return Ok(None);
        }
        Ok(self.window.get(index - self.window_start))
    }

    /// Mutable access, used to traverse an element's nested collection in place
    pub async fn get_mut(&mut self, index: usize) -> Result<Option<&mut T>> {
        if !self.load_window(index).await? {
            return Ok(None);
        }
        let offset = index - self.window_start;
        Ok(self.window.get_mut(offset))
    }

    /// Element at the cursor, advancing it
    ///
    /// Returns `Ok(None)` once the cursor reaches `total()`, or early if the
    /// server returns an empty page.
    pub async fn next_element(&mut self) -> Result<Option<&T>> {
        if !self.has_next() {
            return Ok(None);
        }
        let index = self.position;
        if !self.load_window(index).await? {
            self.position = self.total;
            return Ok(None);
        }
        self.position += 1;
        Ok(self.window.get(index - self.window_start))
    }

    /// Ensure `index` is windowed; `false` means the fetched page was empty
    async fn load_window(&mut self, index: usize) -> Result<bool> {
        if index >= self.total {
            return Err(RetrievalError::invalid_parameter(
                "index",
                format!(
                    "{} is outside [0, {}) for {}",
                    index, self.total, self.category
                ),
            ));
        }
        if self.window_contains(index) {
            return Ok(true);
        }

        let request = PageRequest {
            asset_id: self.context.handle.asset_id().to_string(),
            category: self.category,
            parent_id: self.parent_id.clone(),
            start: index,
            max: self.page_size.min(self.total - index),
        };
        tracing::debug!(
            category = %self.category,
            start = request.start,
            max = request.max,
            "Fetching page for asset {}",
            request.asset_id
        );

        let beans = self
            .context
            .transport
            .fetch_page(self.context.handle.scope(), &request)
            .await?;

        let mut page = Vec::with_capacity(beans.len().min(request.max));
        for bean in beans.into_iter().take(request.max) {
            page.push(T::from_bean(bean, &self.context)?);
        }

        if page.is_empty() {
            tracing::debug!(
                category = %self.category,
                start = index,
                "Empty page, remote sequence is shorter than reported"
            );
        }

        self.window_start = index;
        self.window = page;
        Ok(!self.window.is_empty())
    }
}

/// Same scope, total and window size; empty window and rewound cursor
impl<T> Clone for PagedCollection<T> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            category: self.category,
            parent_id: self.parent_id.clone(),
            total: self.total,
            page_size: self.page_size,
            window_start: 0,
            window: Vec::new(),
            position: 0,
        }
    }
}

impl<T> fmt::Debug for PagedCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedCollection")
            .field("asset_id", &self.context.handle.asset_id())
            .field("category", &self.category)
            .field("parent_id", &self.parent_id)
            .field("total", &self.total)
            .field("page_size", &self.page_size)
            .field("window", &self.window_range())
            .field("position", &self.position)
            .finish()
    }
}
