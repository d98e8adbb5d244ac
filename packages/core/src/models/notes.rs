//! Note Logs and Notes

use serde::{Deserialize, Serialize};

use super::element::AssetElement;
use super::handle::AssetHandle;
use super::header::ElementHeader;
use crate::services::PagedCollection;

/// A log of notes attached to the asset
#[derive(Debug, Clone)]
pub struct NoteLog {
    pub(crate) handle: AssetHandle,
    pub(crate) header: ElementHeader,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub(crate) note_count: usize,
    pub(crate) notes: Option<PagedCollection<Note>>,
}

impl NoteLog {
    pub fn handle(&self) -> &AssetHandle {
        &self.handle
    }

    pub fn header(&self) -> &ElementHeader {
        &self.header
    }

    pub fn guid(&self) -> &str {
        &self.header.guid
    }

    pub fn note_count(&self) -> usize {
        self.note_count
    }

    /// Notes, absent when the log is empty
    pub fn notes(&self) -> Option<&PagedCollection<Note>> {
        self.notes.as_ref()
    }

    pub fn notes_mut(&mut self) -> Option<&mut PagedCollection<Note>> {
        self.notes.as_mut()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteProperties {
    #[serde(default)]
    pub title: Option<String>,

    pub text: String,

    #[serde(default)]
    pub user: Option<String>,
}

pub type Note = AssetElement<NoteProperties>;
