//! Discovery of browsable storage roots.
//!
//! A [`StorageProvider`] enumerates candidate mount points (on Android these
//! are app-private directories such as
//! `/storage/1A2B-3C4D/Android/data/<package>/files`). The
//! [`StorageRootResolver`] strips the private suffix to recover each mount
//! root, validates it with one `stat`, and returns the survivors as
//! [`StorageRoots`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classify::Classifier;
use crate::config::settings::StorageConfig;
use crate::error::{PickerError, PickerResult};
use crate::fs::accessor::{is_dot_hidden, FileSystem, NodeStat};
use crate::fs::entry::Entry;

/// Platform storage enumeration consumed by the resolver.
pub trait StorageProvider: Send + Sync {
    /// Candidate mount paths, in platform order.
    fn mount_candidates(&self) -> PickerResult<Vec<PathBuf>>;

    /// App-private path fragment to strip from candidates, e.g.
    /// `/Android/data/com.example/files`.
    fn private_suffix(&self) -> Option<String> {
        None
    }

    /// The primary (device) storage root, if the platform names one.
    /// When `None` the first valid candidate is used.
    fn primary_root(&self) -> Option<PathBuf> {
        None
    }
}

/// Storage provider driven by the `[storage]` config section.
///
/// Candidates are the configured device root (if any) followed by the
/// configured mounts.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredStorage {
    config: StorageConfig,
}

impl ConfiguredStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

impl StorageProvider for ConfiguredStorage {
    fn mount_candidates(&self) -> PickerResult<Vec<PathBuf>> {
        Ok(self
            .config
            .device_root
            .iter()
            .chain(self.config.mounts.iter())
            .cloned()
            .collect())
    }

    fn private_suffix(&self) -> Option<String> {
        self.config.private_suffix.clone()
    }

    fn primary_root(&self) -> Option<PathBuf> {
        self.config.device_root.clone()
    }
}

/// The validated set of storage roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageRoots {
    device: Option<PathBuf>,
    external: Vec<PathBuf>,
}

impl StorageRoots {
    pub fn new(device: Option<PathBuf>, external: Vec<PathBuf>) -> Self {
        Self { device, external }
    }

    /// The device (primary) storage root.
    pub fn device(&self) -> Option<&Path> {
        self.device.as_deref()
    }

    /// Removable or secondary roots, in enumeration order.
    pub fn external(&self) -> &[PathBuf] {
        &self.external
    }

    /// All roots, device first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.device
            .as_deref()
            .into_iter()
            .chain(self.external.iter().map(PathBuf::as_path))
    }

    pub fn len(&self) -> usize {
        self.paths().count()
    }

    pub fn is_empty(&self) -> bool {
        self.device.is_none() && self.external.is_empty()
    }

    /// Wraps each root as an [`Entry`].
    ///
    /// Roots were validated as existing directories, so no further `stat`
    /// is needed.
    pub fn to_entries(&self, classifier: &Arc<Classifier>) -> Vec<Entry> {
        self.paths()
            .map(|path| {
                let stat = NodeStat {
                    is_dir: true,
                    is_hidden: is_dot_hidden(path),
                    size_bytes: 0,
                    exists: true,
                };
                Entry::from_stat(path.to_path_buf(), stat, Arc::clone(classifier))
            })
            .collect()
    }
}

/// Outcome of [`StorageRootResolver::resolve`].
///
/// `warning` carries the non-fatal condition to surface to the host: the
/// enumeration error, or [`PickerError::NoAccessibleStorage`].
#[derive(Debug, Default)]
pub struct Resolution {
    pub roots: StorageRoots,
    pub warning: Option<PickerError>,
}

/// Turns provider candidates into validated [`StorageRoots`].
pub struct StorageRootResolver {
    provider: Arc<dyn StorageProvider>,
    fs: Arc<dyn FileSystem>,
}

impl StorageRootResolver {
    pub fn new(provider: Arc<dyn StorageProvider>, fs: Arc<dyn FileSystem>) -> Self {
        Self { provider, fs }
    }

    /// Enumerates, strips and validates storage roots.
    ///
    /// Never fails: enumeration errors and an empty result are logged and
    /// reported through [`Resolution::warning`].
    pub async fn resolve(&self) -> Resolution {
        let candidates = match self.provider.mount_candidates() {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("storage enumeration failed: {e}");
                return Resolution {
                    roots: StorageRoots::default(),
                    warning: Some(e),
                };
            }
        };

        let suffix = self.provider.private_suffix();
        let mut valid: Vec<PathBuf> = Vec::new();
        for candidate in candidates {
            let root = strip_private_suffix(&candidate, suffix.as_deref());
            if valid.contains(&root) {
                continue;
            }
            if self.is_accessible(&root).await {
                valid.push(root);
            } else {
                tracing::debug!("skipping inaccessible storage {}", root.display());
            }
        }

        let primary = match self.provider.primary_root() {
            Some(primary) => {
                let primary = strip_private_suffix(&primary, suffix.as_deref());
                match valid.iter().position(|p| *p == primary) {
                    Some(index) => Some(valid.remove(index)),
                    None if self.is_accessible(&primary).await => Some(primary),
                    None => {
                        tracing::debug!("primary storage {} is inaccessible", primary.display());
                        None
                    }
                }
            }
            None => None,
        };
        let device = primary.or_else(|| (!valid.is_empty()).then(|| valid.remove(0)));
        let roots = StorageRoots::new(device, valid);

        if roots.is_empty() {
            tracing::warn!("no accessible storage roots");
            return Resolution {
                roots,
                warning: Some(PickerError::NoAccessibleStorage),
            };
        }

        tracing::debug!("resolved {} storage root(s)", roots.len());
        Resolution {
            roots,
            warning: None,
        }
    }

    async fn is_accessible(&self, path: &Path) -> bool {
        match self.fs.stat(path).await {
            Ok(stat) => stat.is_existing_dir(),
            Err(e) => {
                tracing::debug!("stat failed for storage {}: {e}", path.display());
                false
            }
        }
    }
}

/// Removes the app-private fragment from `path`, recovering the mount root.
/// Paths that do not contain it are returned unchanged.
pub fn strip_private_suffix(path: &Path, suffix: Option<&str>) -> PathBuf {
    let Some(suffix) = suffix.filter(|s| !s.is_empty()) else {
        return path.to_path_buf();
    };
    let text = path.to_string_lossy();
    if !text.contains(suffix) {
        return path.to_path_buf();
    }
    let stripped = text.replace(suffix, "");
    if stripped.is_empty() {
        PathBuf::from("/")
    } else {
        PathBuf::from(stripped)
    }
}
