//! Directory listing with selection-mode and hidden-file filtering.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classify::Classifier;
use crate::error::{PickerError, PickerResult};
use crate::fs::accessor::FileSystem;
use crate::fs::entry::Entry;

/// What the picker is choosing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The session ends when a file is chosen; directories are browsed.
    #[default]
    File,
    /// Only directories are listed; the host commits the current directory.
    Directory,
}

/// The outcome of [`DirectoryLister::list`].
///
/// A failed listing has no entries and carries the error so the host can
/// tell "empty" from "unreadable".
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<Entry>,
    pub error: Option<PickerError>,
}

impl Listing {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Lists directories through a [`FileSystem`], wrapping each child in an
/// [`Entry`].
#[derive(Clone)]
pub struct DirectoryLister {
    fs: Arc<dyn FileSystem>,
    classifier: Arc<Classifier>,
}

impl DirectoryLister {
    pub fn new(fs: Arc<dyn FileSystem>, classifier: Arc<Classifier>) -> Self {
        Self { fs, classifier }
    }

    pub fn classifier(&self) -> &Arc<Classifier> {
        &self.classifier
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Lists `dir`, converting failures into an empty [`Listing`].
    ///
    /// Failures are logged at `warn` level.
    pub async fn list(&self, dir: &Entry, mode: SelectionMode, show_hidden: bool) -> Listing {
        match self.try_list(dir, mode, show_hidden).await {
            Ok(entries) => Listing {
                entries,
                error: None,
            },
            Err(e) => {
                tracing::warn!("failed to list {}: {e}", dir.path().display());
                Listing {
                    entries: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// Lists `dir`, returning the raw error on failure.
    ///
    /// Each child is probed with exactly one `stat`. In
    /// [`SelectionMode::Directory`] non-directories are dropped first, then
    /// hidden children unless `show_hidden` is set. The returned entries are
    /// in enumeration order.
    pub async fn try_list(
        &self,
        dir: &Entry,
        mode: SelectionMode,
        show_hidden: bool,
    ) -> PickerResult<Vec<Entry>> {
        let children = dir.children(self.fs.as_ref()).await?;

        let mut entries = Vec::with_capacity(children.len());
        for path in children {
            let classifier = Arc::clone(&self.classifier);
            entries.push(Entry::probe(path, self.fs.as_ref(), classifier).await);
        }

        Ok(filter_hidden(filter_by_mode(entries, mode), show_hidden))
    }
}

/// Keeps only directories in [`SelectionMode::Directory`].
pub fn filter_by_mode(entries: Vec<Entry>, mode: SelectionMode) -> Vec<Entry> {
    match mode {
        SelectionMode::File => entries,
        SelectionMode::Directory => entries.into_iter().filter(Entry::is_dir).collect(),
    }
}

/// Filters out hidden entries when `show_hidden` is `false`.
pub fn filter_hidden(entries: Vec<Entry>, show_hidden: bool) -> Vec<Entry> {
    if show_hidden {
        return entries;
    }
    entries.into_iter().filter(|e| !e.is_hidden()).collect()
}
