//! Asset Graph
//!
//! Root aggregator for one asset's metadata. Construction fetches a single
//! summary envelope (header, per-category counts, optional top-level schema);
//! everything else is materialized lazily through [`PagedCollection`]s.
//!
//! # Lifecycle
//!
//! - Categories with a zero count never get a collection; their accessors
//!   return `None` without a network call.
//! - Each category's collection is created on first access and then kept:
//!   accessors always return the same instance, so a traversal position
//!   survives between calls. `clone()` the collection for an independent
//!   traversal.
//! - Comments, likes, ratings and informal tags are constructed together the
//!   first time any of them is requested. Each of the four collections is
//!   still fetched independently, page by page.
//! - The top-level schema type, when present, is resolved during construction.
//!
//! # Examples
//!
//! ```rust,no_run
//! use assetgraph_core::client::TransportClient;
//! use assetgraph_core::config::RetrievalConfig;
//! use assetgraph_core::models::ScopeContext;
//! use assetgraph_core::services::AssetGraph;
//! use std::sync::Arc;
//!
//! # async fn example(transport: Arc<dyn TransportClient>) -> assetgraph_core::client::Result<()> {
//! let scope = ScopeContext::new("cocoMDS1", "https://localhost:9443", "erinoverview");
//! let mut graph = AssetGraph::construct(transport, scope, "asset-guid", RetrievalConfig::default()).await?;
//!
//! if let Some(comments) = graph.comments() {
//!     while let Some(comment) = comments.next_element().await? {
//!         println!("{}", comment.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{Result, RetrievalError, TransportClient};
use crate::config::RetrievalConfig;
use crate::models::{
    AssetHandle, AssetHeader, Category, Certification, Comment, ExternalIdentifier,
    ExternalReference, InformalTag, License, Like, Location, Meaning, NoteLog, Rating,
    ScopeContext, SchemaTypeNode, SearchKeyword,
};
use crate::services::paged_collection::{CollectionContext, PagedCollection};
use crate::services::schema_resolver::SchemaTypeResolver;

/// Comments, likes, ratings and informal tags, constructed as one group
#[derive(Debug)]
struct FeedbackCollections {
    comments: Option<PagedCollection<Comment>>,
    likes: Option<PagedCollection<Like>>,
    ratings: Option<PagedCollection<Rating>>,
    informal_tags: Option<PagedCollection<InformalTag>>,
}

impl FeedbackCollections {
    fn build(context: &CollectionContext, counts: &HashMap<Category, usize>) -> Self {
        Self {
            comments: top_level(context, counts, Category::Comments),
            likes: top_level(context, counts, Category::Likes),
            ratings: top_level(context, counts, Category::Ratings),
            informal_tags: top_level(context, counts, Category::InformalTags),
        }
    }

    fn contains(&self, category: Category) -> bool {
        match category {
            Category::Comments => self.comments.is_some(),
            Category::Likes => self.likes.is_some(),
            Category::Ratings => self.ratings.is_some(),
            Category::InformalTags => self.informal_tags.is_some(),
            _ => false,
        }
    }
}

fn top_level<T>(
    context: &CollectionContext,
    counts: &HashMap<Category, usize>,
    category: Category,
) -> Option<PagedCollection<T>> {
    let total = counts.get(&category).copied().unwrap_or(0);
    (total > 0).then(|| PagedCollection::new(context.clone(), category, None, total))
}

/// Write-once lazy slot for one category
fn lazily<'a, T>(
    slot: &'a mut Option<PagedCollection<T>>,
    context: &CollectionContext,
    counts: &HashMap<Category, usize>,
    category: Category,
) -> Option<&'a mut PagedCollection<T>> {
    if slot.is_none() {
        *slot = top_level(context, counts, category);
    }
    slot.as_mut()
}

/// Lazily materialized metadata graph of one asset
#[derive(Debug)]
pub struct AssetGraph {
    context: CollectionContext,
    header: AssetHeader,
    counts: HashMap<Category, usize>,
    schema_type: Option<SchemaTypeNode>,
    feedback: Option<FeedbackCollections>,
    note_logs: Option<PagedCollection<NoteLog>>,
    licenses: Option<PagedCollection<License>>,
    certifications: Option<PagedCollection<Certification>>,
    locations: Option<PagedCollection<Location>>,
    external_references: Option<PagedCollection<ExternalReference>>,
    external_identifiers: Option<PagedCollection<ExternalIdentifier>>,
    meanings: Option<PagedCollection<Meaning>>,
    search_keywords: Option<PagedCollection<SearchKeyword>>,
}

impl AssetGraph {
    /// Fetch the asset summary and prepare the graph
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a blank asset identifier, blank scope
    ///   identifiers or an invalid config; no network call is made
    /// - any failure of the summary fetch, unchanged
    /// - `ServiceUnavailable` if the embedded schema type does not decode
    pub async fn construct(
        transport: Arc<dyn TransportClient>,
        scope: ScopeContext,
        asset_id: &str,
        config: RetrievalConfig,
    ) -> Result<Self> {
        if asset_id.trim().is_empty() {
            return Err(RetrievalError::invalid_parameter(
                "asset_id",
                "must not be blank",
            ));
        }
        scope.validate()?;
        config.validate()?;

        let summary = transport.fetch_summary(&scope, asset_id).await?;
        let counts = summary.category_counts();

        let handle = AssetHandle::new(asset_id, Arc::new(scope));
        let context = CollectionContext::new(handle, transport, config);

        let schema_type = summary
            .schema_type
            .map(|bean| SchemaTypeResolver::new(&context).resolve(bean))
            .transpose()?;

        tracing::info!(
            categories = counts.len(),
            has_schema = schema_type.is_some(),
            "Constructed asset graph for {} ({})",
            asset_id,
            summary.header.qualified_name
        );

        Ok(Self {
            context,
            header: summary.header,
            counts,
            schema_type,
            feedback: None,
            note_logs: None,
            licenses: None,
            certifications: None,
            locations: None,
            external_references: None,
            external_identifiers: None,
            meanings: None,
            search_keywords: None,
        })
    }

    pub fn asset_id(&self) -> &str {
        self.context.handle().asset_id()
    }

    pub fn header(&self) -> &AssetHeader {
        &self.header
    }

    pub fn scope(&self) -> &ScopeContext {
        self.context.handle().scope()
    }

    /// Handle shared by every element of this graph
    pub fn handle(&self) -> &AssetHandle {
        self.context.handle()
    }

    pub fn config(&self) -> &RetrievalConfig {
        self.context.config()
    }

    /// Count reported in the summary; zero for absent or nested categories
    pub fn element_count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Top-level schema type, resolved at construction
    pub fn schema_type(&self) -> Option<&SchemaTypeNode> {
        self.schema_type.as_ref()
    }

    pub fn schema_type_mut(&mut self) -> Option<&mut SchemaTypeNode> {
        self.schema_type.as_mut()
    }

    /// Whether the collection for `category` has been built yet
    pub fn is_constructed(&self, category: Category) -> bool {
        match category {
            c if c.is_feedback() => self
                .feedback
                .as_ref()
                .is_some_and(|feedback| feedback.contains(c)),
            Category::NoteLogs => self.note_logs.is_some(),
            Category::Licenses => self.licenses.is_some(),
            Category::Certifications => self.certifications.is_some(),
            Category::Locations => self.locations.is_some(),
            Category::ExternalReferences => self.external_references.is_some(),
            Category::ExternalIdentifiers => self.external_identifiers.is_some(),
            Category::Meanings => self.meanings.is_some(),
            Category::SearchKeywords => self.search_keywords.is_some(),
            _ => false,
        }
    }

    fn feedback(&mut self) -> &mut FeedbackCollections {
        let context = &self.context;
        let counts = &self.counts;
        self.feedback
            .get_or_insert_with(|| FeedbackCollections::build(context, counts))
    }

    pub fn comments(&mut self) -> Option<&mut PagedCollection<Comment>> {
        self.feedback().comments.as_mut()
    }

    pub fn likes(&mut self) -> Option<&mut PagedCollection<Like>> {
        self.feedback().likes.as_mut()
    }

    pub fn ratings(&mut self) -> Option<&mut PagedCollection<Rating>> {
        self.feedback().ratings.as_mut()
    }

    pub fn informal_tags(&mut self) -> Option<&mut PagedCollection<InformalTag>> {
        self.feedback().informal_tags.as_mut()
    }

    pub fn note_logs(&mut self) -> Option<&mut PagedCollection<NoteLog>> {
        lazily(&mut self.note_logs, &self.context, &self.counts, Category::NoteLogs)
    }

    pub fn licenses(&mut self) -> Option<&mut PagedCollection<License>> {
        lazily(&mut self.licenses, &self.context, &self.counts, Category::Licenses)
    }

    pub fn certifications(&mut self) -> Option<&mut PagedCollection<Certification>> {
        lazily(
            &mut self.certifications,
            &self.context,
            &self.counts,
            Category::Certifications,
        )
    }

    pub fn locations(&mut self) -> Option<&mut PagedCollection<Location>> {
        lazily(&mut self.locations, &self.context, &self.counts, Category::Locations)
    }

    pub fn external_references(&mut self) -> Option<&mut PagedCollection<ExternalReference>> {
        lazily(
            &mut self.external_references,
            &self.context,
            &self.counts,
            Category::ExternalReferences,
        )
    }

    pub fn external_identifiers(&mut self) -> Option<&mut PagedCollection<ExternalIdentifier>> {
        lazily(
            &mut self.external_identifiers,
            &self.context,
            &self.counts,
            Category::ExternalIdentifiers,
        )
    }

    pub fn meanings(&mut self) -> Option<&mut PagedCollection<Meaning>> {
        lazily(&mut self.meanings, &self.context, &self.counts, Category::Meanings)
    }

    pub fn search_keywords(&mut self) -> Option<&mut PagedCollection<SearchKeyword>> {
        lazily(
            &mut self.search_keywords,
            &self.context,
            &self.counts,
            Category::SearchKeywords,
        )
    }
}
