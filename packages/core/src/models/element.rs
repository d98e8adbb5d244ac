//! Flat Asset Elements
//!
//! Most categories materialize as an [`AssetElement`]: the common header, the
//! category-specific properties, and a handle back to the owning asset. Only
//! comments, note logs and schema attributes need their own structs because
//! they carry nested collections or schema types.

use super::handle::AssetHandle;
use super::header::ElementHeader;

/// A non-recursive element of one category
#[derive(Debug, Clone, PartialEq)]
pub struct AssetElement<P> {
    pub(crate) handle: AssetHandle,
    pub(crate) header: ElementHeader,
    pub(crate) properties: P,
}

impl<P> AssetElement<P> {
    /// Handle back to the owning asset
    pub fn handle(&self) -> &AssetHandle {
        &self.handle
    }

    pub fn header(&self) -> &ElementHeader {
        &self.header
    }

    pub fn guid(&self) -> &str {
        &self.header.guid
    }

    pub fn properties(&self) -> &P {
        &self.properties
    }

    pub fn into_properties(self) -> P {
        self.properties
    }
}
