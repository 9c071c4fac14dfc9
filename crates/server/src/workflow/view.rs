//! View models returned by the workflow handlers.

use mailform_core::FileLink;
use serde::{Deserialize, Serialize};

/// Text of the single list item shown when the store is empty.
pub const EMPTY_PLACEHOLDER: &str = "No files yet!";

/// One entry of the rendered file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileListItem {
    /// Shown alone when there are no uploads.
    Placeholder { text: String },
    /// A stored file with its download link.
    Link(FileLink),
}

impl FileListItem {
    /// The visible text of the item.
    pub fn text(&self) -> &str {
        match self {
            Self::Placeholder { text } => text,
            Self::Link(link) => &link.label,
        }
    }
}

/// A file from an upload event that could not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFailure {
    pub filename: String,
    pub error: String,
}

/// The file list panel: one item per stored file, or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListView {
    pub items: Vec<FileListItem>,
    /// Per-file failures from the upload that produced this view.
    #[serde(default)]
    pub errors: Vec<UploadFailure>,
}

impl FileListView {
    /// Render the list for the given stored filenames.
    pub fn from_names(names: Vec<String>) -> Self {
        let items = if names.is_empty() {
            vec![FileListItem::Placeholder {
                text: EMPTY_PLACEHOLDER.to_owned(),
            }]
        } else {
            names
                .into_iter()
                .map(|name| FileListItem::Link(FileLink::new(name)))
                .collect()
        };
        Self {
            items,
            errors: Vec::new(),
        }
    }

    /// Labels of the linked files (the placeholder is not included).
    pub fn filenames(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                FileListItem::Link(link) => Some(link.label.as_str()),
                FileListItem::Placeholder { .. } => None,
            })
            .collect()
    }
}
