//! Entry representation.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use unicode_normalization::UnicodeNormalization;

use crate::classify::{Classifier, FileType, RootKind};
use crate::error::PickerResult;
use crate::fs::accessor::{FileSystem, NodeStat};
use crate::fs::size::{format_item_count, format_size};

/// MIME type reported when the file name gives no hint.
pub const WILDCARD_MIME: &str = "*/*";

/// Label memoized for a directory whose children could not be counted.
pub const UNKNOWN_ITEM_COUNT: &str = "? items";

const MAX_EXTENSION_CHARS: usize = 3;

/// A single filesystem node as the picker sees it.
///
/// The path is fixed at construction, together with the result of exactly
/// one `stat`. Everything else (label, extension, MIME type, file type,
/// size label) is derived on first access and memoized, so repeated reads
/// never touch the filesystem. Equality and hashing use the path only.
///
/// Clones share the size label, so a label loaded through one clone (for
/// example an entry of a view snapshot) is visible through all of them.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use std::sync::Arc;
/// use fpick_core::{Classifier, Entry, FileType, NodeStat};
///
/// let stat = NodeStat { exists: true, size_bytes: 1536, ..NodeStat::default() };
/// let entry = Entry::from_stat(
///     PathBuf::from("/music/track.mp3"),
///     stat,
///     Arc::new(Classifier::default()),
/// );
/// assert_eq!(entry.label(), "track.mp3");
/// assert_eq!(entry.extension(), ".mp3");
/// assert_eq!(entry.file_type(), FileType::Audio);
/// assert_eq!(entry.size_label(), Some("1.50 KB"));
/// ```
#[derive(Debug, Clone)]
pub struct Entry {
    path: PathBuf,
    stat: NodeStat,
    classifier: Arc<Classifier>,
    label: OnceLock<String>,
    extension: OnceLock<String>,
    mime_type: OnceLock<String>,
    file_type: OnceLock<FileType>,
    size_label: Arc<OnceLock<String>>,
}

impl Entry {
    /// Creates an entry by performing one `stat` on `path`.
    ///
    /// A failed stat is logged and replaced by [`NodeStat::missing`], so the
    /// entry still classifies (as [`FileType::Unknown`] unless it is a
    /// storage root) and reports a size of `0 B`.
    pub async fn probe(path: PathBuf, fs: &dyn FileSystem, classifier: Arc<Classifier>) -> Self {
        let stat = match fs.stat(&path).await {
            Ok(stat) => stat,
            Err(e) => {
                tracing::warn!("stat failed for {}: {e}", path.display());
                NodeStat::missing()
            }
        };
        Self::from_stat(path, stat, classifier)
    }

    /// Creates an entry from an already known stat.
    pub fn from_stat(path: PathBuf, stat: NodeStat, classifier: Arc<Classifier>) -> Self {
        Self {
            path,
            stat,
            classifier,
            label: OnceLock::new(),
            extension: OnceLock::new(),
            mime_type: OnceLock::new(),
            file_type: OnceLock::new(),
            size_label: Arc::default(),
        }
    }

    /// Returns the absolute path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.stat.is_dir
    }

    pub fn is_hidden(&self) -> bool {
        self.stat.is_hidden
    }

    /// Returns `false` when the construction stat found nothing (or failed).
    pub fn exists(&self) -> bool {
        self.stat.exists
    }

    /// Size in bytes. Always `0` for directories.
    pub fn size_bytes(&self) -> u64 {
        self.stat.size_bytes
    }

    /// Display name: a storage-root label, or the NFC-normalised file name.
    pub fn label(&self) -> &str {
        self.label.get_or_init(|| match self.classifier.root_kind(&self.path) {
            Some(RootKind::Device) => "Device storage".to_string(),
            Some(RootKind::External) => "External storage".to_string(),
            None => self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().nfc().collect::<String>())
                .unwrap_or_else(|| self.path.display().to_string()),
        })
    }

    /// The extension with its leading dot, cut to three characters after it
    /// (`".jpe"` for `photo.jpeg`). Empty when there is none.
    pub fn extension(&self) -> &str {
        self.extension.get_or_init(|| {
            self.path
                .extension()
                .map(|ext| {
                    let ext: String = ext
                        .to_string_lossy()
                        .chars()
                        .take(MAX_EXTENSION_CHARS)
                        .collect();
                    format!(".{ext}")
                })
                .unwrap_or_default()
        })
    }

    /// MIME type guessed from the file name, or [`WILDCARD_MIME`].
    pub fn mime_type(&self) -> &str {
        self.mime_type.get_or_init(|| {
            mime_guess::from_path(&self.path)
                .first()
                .map(|mime| mime.essence_str().to_string())
                .unwrap_or_else(|| WILDCARD_MIME.to_string())
        })
    }

    pub fn file_type(&self) -> FileType {
        *self
            .file_type
            .get_or_init(|| self.classifier.classify(self))
    }

    /// Size label if already known.
    ///
    /// Files always have one. Directories only after
    /// [`Entry::load_size_label`] has counted their children.
    pub fn size_label(&self) -> Option<&str> {
        if self.is_dir() {
            self.size_label.get().map(String::as_str)
        } else {
            Some(
                self.size_label
                    .get_or_init(|| format_size(self.stat.size_bytes))
                    .as_str(),
            )
        }
    }

    /// Computes the size label, listing children for directories.
    ///
    /// A failed listing is logged and memoized as [`UNKNOWN_ITEM_COUNT`].
    pub async fn load_size_label(&self, fs: &dyn FileSystem) -> &str {
        if let Some(label) = self.size_label() {
            return label;
        }
        let label = match self.children(fs).await {
            Ok(children) => format_item_count(children.len()),
            Err(e) => {
                tracing::warn!("could not count items in {}: {e}", self.path.display());
                UNKNOWN_ITEM_COUNT.to_string()
            }
        };
        self.size_label.get_or_init(|| label).as_str()
    }

    /// Lists the paths of this entry's children.
    ///
    /// This is the only operation on `Entry` that performs I/O after
    /// construction. Failures are returned, not swallowed.
    pub async fn children(&self, fs: &dyn FileSystem) -> PickerResult<Vec<PathBuf>> {
        fs.list_children(&self.path).await
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
