//! Element Factory
//!
//! Builds rich elements from raw wire beans, one strategy per category:
//!
//! - Comments attach a nested reply collection when `replyCount > 0`
//! - Note logs attach a nested note collection when `noteCount > 0`
//! - Schema attributes resolve an inline `attributeType`, or keep an
//!   `attributeTypeLink` verbatim
//! - Every other category decodes into a flat [`AssetElement`]
//!
//! Nested collections are built but never fetched here; a zero count produces
//! no collection at all, so an empty thread costs no round trip.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::client::Result;
use crate::models::schema::{AttributeType, SchemaAttribute, SchemaLink};
use crate::models::{
    AssetElement, Category, CertificationProperties, Comment, CommentType, ElementHeader,
    ExternalIdentifierProperties, ExternalReferenceProperties, InformalTagProperties,
    LicenseProperties, LikeProperties, LocationProperties, MeaningProperties, NoteLog,
    NoteProperties, RatingProperties, SearchKeywordProperties,
};
use crate::services::paged_collection::{CollectionContext, PagedCollection};
use crate::services::schema_resolver::SchemaTypeResolver;

/// Build strategy of a [`PagedCollection`]: one raw bean into one element
pub trait Element: Sized + Send {
    /// # Errors
    ///
    /// `ServiceUnavailable` if the bean does not decode.
    fn from_bean(bean: Value, context: &CollectionContext) -> Result<Self>;
}

/// Properties of a category that materializes as a flat [`AssetElement`]
pub trait FlatProperties: DeserializeOwned + Send {}

impl FlatProperties for LicenseProperties {}
impl FlatProperties for CertificationProperties {}
impl FlatProperties for LocationProperties {}
impl FlatProperties for ExternalReferenceProperties {}
impl FlatProperties for ExternalIdentifierProperties {}
impl FlatProperties for MeaningProperties {}
impl FlatProperties for SearchKeywordProperties {}
impl FlatProperties for InformalTagProperties {}
impl FlatProperties for RatingProperties {}
impl FlatProperties for LikeProperties {}
impl FlatProperties for NoteProperties {}

#[derive(Deserialize)]
#[serde(bound = "P: DeserializeOwned")]
struct FlatBean<P> {
    #[serde(flatten)]
    header: ElementHeader,
    #[serde(flatten)]
    properties: P,
}

impl<P: FlatProperties> Element for AssetElement<P> {
    fn from_bean(bean: Value, context: &CollectionContext) -> Result<Self> {
        let FlatBean { header, properties } = serde_json::from_value::<FlatBean<P>>(bean)?;
        Ok(AssetElement {
            handle: context.handle().clone(),
            header,
            properties,
        })
    }
}

/// Lazy child collection, or `None` when the parent reports no children
pub(crate) fn nested_collection<T>(
    context: &CollectionContext,
    category: Category,
    parent_id: &str,
    count: usize,
) -> Option<PagedCollection<T>> {
    (count > 0).then(|| {
        PagedCollection::new(
            context.clone(),
            category,
            Some(parent_id.to_string()),
            count,
        )
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentBean {
    #[serde(flatten)]
    header: ElementHeader,
    #[serde(default)]
    comment_type: CommentType,
    #[serde(default)]
    text: String,
    #[serde(default)]
    is_public: bool,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    reply_count: usize,
}

impl Element for Comment {
    fn from_bean(bean: Value, context: &CollectionContext) -> Result<Self> {
        let bean: CommentBean = serde_json::from_value(bean)?;
        let replies = nested_collection(
            context,
            Category::Replies,
            &bean.header.guid,
            bean.reply_count,
        );
        Ok(Comment {
            handle: context.handle().clone(),
            header: bean.header,
            comment_type: bean.comment_type,
            text: bean.text,
            is_public: bean.is_public,
            user: bean.user,
            reply_count: bean.reply_count,
            replies,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteLogBean {
    #[serde(flatten)]
    header: ElementHeader,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_public: bool,
    #[serde(default)]
    note_count: usize,
}

impl Element for NoteLog {
    fn from_bean(bean: Value, context: &CollectionContext) -> Result<Self> {
        let bean: NoteLogBean = serde_json::from_value(bean)?;
        let notes = nested_collection(context, Category::Notes, &bean.header.guid, bean.note_count);
        Ok(NoteLog {
            handle: context.handle().clone(),
            header: bean.header,
            name: bean.name,
            description: bean.description,
            is_public: bean.is_public,
            note_count: bean.note_count,
            notes,
        })
    }
}

fn default_nullable() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaAttributeBean {
    #[serde(flatten)]
    header: ElementHeader,
    name: String,
    #[serde(default)]
    qualified_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    position: u32,
    #[serde(default)]
    min_cardinality: u32,
    /// Negative means unbounded
    #[serde(default)]
    max_cardinality: Option<i64>,
    #[serde(default = "default_nullable")]
    is_nullable: bool,
    #[serde(default)]
    default_value: Option<String>,
    #[serde(default)]
    attribute_type: Option<Value>,
    #[serde(default)]
    attribute_type_link: Option<SchemaLink>,
}

impl Element for SchemaAttribute {
    fn from_bean(bean: Value, context: &CollectionContext) -> Result<Self> {
        let bean: SchemaAttributeBean = serde_json::from_value(bean)?;
        let attribute_type = match (bean.attribute_type, bean.attribute_type_link) {
            (Some(inline), _) => Some(AttributeType::Inline(
                SchemaTypeResolver::new(context).resolve(inline)?,
            )),
            (None, Some(link)) => Some(AttributeType::Link(link)),
            (None, None) => None,
        };
        Ok(SchemaAttribute {
            handle: context.handle().clone(),
            header: bean.header,
            name: bean.name,
            qualified_name: bean.qualified_name,
            description: bean.description,
            position: bean.position,
            min_cardinality: bean.min_cardinality,
            max_cardinality: bean
                .max_cardinality
                .and_then(|max| u32::try_from(max).ok()),
            is_nullable: bean.is_nullable,
            default_value: bean.default_value,
            attribute_type,
        })
    }
}
