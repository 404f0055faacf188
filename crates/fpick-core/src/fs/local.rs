//! [`FileSystem`] implementation backed by the local disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{PickerError, PickerResult};
use crate::fs::accessor::{is_dot_hidden, FileSystem, NodeStat};

/// Reads the real filesystem through `tokio::fs`.
///
/// Hidden nodes are detected by a leading `.` in the file name. A missing
/// path stats as `exists = false` rather than failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> PickerResult<NodeStat> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(NodeStat {
                is_dir: metadata.is_dir(),
                is_hidden: is_dot_hidden(path),
                size_bytes: if metadata.is_dir() { 0 } else { metadata.len() },
                exists: true,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(NodeStat {
                is_hidden: is_dot_hidden(path),
                ..NodeStat::missing()
            }),
            Err(e) => Err(PickerError::from_io(path, e)),
        }
    }

    async fn list_children(&self, path: &Path) -> PickerResult<Vec<PathBuf>> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| PickerError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(PickerError::NotADirectory(path.to_path_buf()));
        }

        let mut read_dir = tokio::fs::read_dir(path)
            .await
            .map_err(|e| PickerError::from_io(path, e))?;

        let mut children = Vec::new();
        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => children.push(entry.path()),
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry in {}: {e}", path.display());
                    continue;
                }
            }
        }

        Ok(children)
    }
}
