//! In-memory [`FileSystem`] for hosts without a real disk and for tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{PickerError, PickerResult};
use crate::fs::accessor::{is_dot_hidden, FileSystem, NodeStat};

#[derive(Debug, Clone, Copy)]
struct MemoryNode {
    is_dir: bool,
    is_hidden: bool,
    size_bytes: u64,
}

/// A static tree of nodes keyed by absolute path.
///
/// Built with the `with_*` methods, which return a new instance. Adding a
/// node also adds any missing ancestor directories. Children are listed in
/// path order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: BTreeMap<PathBuf, MemoryNode>,
    denied: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_hidden = is_dot_hidden(&path);
        self.with_node(
            path,
            MemoryNode {
                is_dir: true,
                is_hidden,
                size_bytes: 0,
            },
        )
    }

    /// Adds a regular file of `size_bytes` bytes.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        let is_hidden = is_dot_hidden(&path);
        self.with_node(
            path,
            MemoryNode {
                is_dir: false,
                is_hidden,
                size_bytes,
            },
        )
    }

    /// Flags an existing node as hidden regardless of its name.
    #[must_use]
    pub fn with_hidden(self, path: impl AsRef<Path>) -> Self {
        let mut nodes = self.nodes;
        if let Some(node) = nodes.get_mut(path.as_ref()) {
            node.is_hidden = true;
        }
        Self { nodes, ..self }
    }

    /// Makes listing `path` fail with [`PickerError::PermissionDenied`].
    #[must_use]
    pub fn with_denied(self, path: impl Into<PathBuf>) -> Self {
        let mut denied = self.denied;
        denied.insert(path.into());
        Self { denied, ..self }
    }

    fn with_node(self, path: PathBuf, node: MemoryNode) -> Self {
        let mut nodes = self.nodes;
        for ancestor in path.ancestors().skip(1) {
            nodes.entry(ancestor.to_path_buf()).or_insert(MemoryNode {
                is_dir: true,
                is_hidden: is_dot_hidden(ancestor),
                size_bytes: 0,
            });
        }
        nodes.insert(path, node);
        Self { nodes, ..self }
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn stat(&self, path: &Path) -> PickerResult<NodeStat> {
        Ok(match self.nodes.get(path) {
            Some(node) => NodeStat {
                is_dir: node.is_dir,
                is_hidden: node.is_hidden,
                size_bytes: node.size_bytes,
                exists: true,
            },
            None => NodeStat::missing(),
        })
    }

    async fn list_children(&self, path: &Path) -> PickerResult<Vec<PathBuf>> {
        let node = self
            .nodes
            .get(path)
            .ok_or_else(|| PickerError::NotFound(path.to_path_buf()))?;
        if !node.is_dir {
            return Err(PickerError::NotADirectory(path.to_path_buf()));
        }
        if self.denied.contains(path) {
            return Err(PickerError::PermissionDenied(path.to_path_buf()));
        }

        Ok(self
            .nodes
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/data/a.txt", 10)
            .with_dir("/data/b")
            .with_dir("/data/.hidden")
            .with_file("/data/b/deep.png", 2048)
    }

    #[tokio::test]
    async fn ancestors_are_created() {
        let fs = sample();
        let stat = fs.stat(Path::new("/data")).await.unwrap();
        assert!(stat.is_existing_dir());
        let root = fs.stat(Path::new("/")).await.unwrap();
        assert!(root.is_existing_dir());
    }

    #[tokio::test]
    async fn lists_immediate_children_only() {
        let children = sample().list_children(Path::new("/data")).await.unwrap();
        assert_eq!(
            children,
            vec![
                PathBuf::from("/data/.hidden"),
                PathBuf::from("/data/a.txt"),
                PathBuf::from("/data/b"),
            ]
        );
    }

    #[tokio::test]
    async fn dot_names_are_hidden() {
        let stat = sample().stat(Path::new("/data/.hidden")).await.unwrap();
        assert!(stat.is_hidden);
    }

    #[tokio::test]
    async fn with_hidden_flags_any_name() {
        let fs = sample().with_hidden("/data/b");
        assert!(fs.stat(Path::new("/data/b")).await.unwrap().is_hidden);
    }

    #[tokio::test]
    async fn file_size_is_reported() {
        let stat = sample().stat(Path::new("/data/a.txt")).await.unwrap();
        assert_eq!(stat.size_bytes, 10);
        assert!(!stat.is_dir);
    }

    #[tokio::test]
    async fn missing_path_stats_as_missing() {
        let stat = sample().stat(Path::new("/nowhere")).await.unwrap();
        assert_eq!(stat, NodeStat::missing());
    }

    #[tokio::test]
    async fn listing_errors() {
        let fs = sample().with_denied("/data/b");
        assert!(matches!(
            fs.list_children(Path::new("/nowhere")).await,
            Err(PickerError::NotFound(_))
        ));
        assert!(matches!(
            fs.list_children(Path::new("/data/a.txt")).await,
            Err(PickerError::NotADirectory(_))
        ));
        assert!(matches!(
            fs.list_children(Path::new("/data/b")).await,
            Err(PickerError::PermissionDenied(_))
        ));
    }
}
