//! The filesystem accessor the picker consumes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::PickerResult;

/// The result of a single `stat` probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStat {
    pub is_dir: bool,
    pub is_hidden: bool,
    pub size_bytes: u64,
    pub exists: bool,
}

impl NodeStat {
    /// The stat used when a probe fails: a missing, visible, empty file.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Returns `true` if the node exists and is a directory.
    pub fn is_existing_dir(&self) -> bool {
        self.exists && self.is_dir
    }
}

/// Abstract access to a filesystem.
///
/// Implementations decide what "hidden" means for their platform.
/// [`FileSystem::list_children`] returns children in enumeration order;
/// the picker never re-sorts them.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Probes a single node.
    async fn stat(&self, path: &Path) -> PickerResult<NodeStat>;

    /// Lists the absolute paths of the immediate children of `path`.
    async fn list_children(&self, path: &Path) -> PickerResult<Vec<PathBuf>>;
}

/// Returns `true` if the last path component starts with `.`.
pub(crate) fn is_dot_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
