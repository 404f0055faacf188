//! Semantic classification of entries.
//!
//! [`Classifier`] maps an [`Entry`] to a [`FileType`] using, in order of
//! precedence: storage-root detection, the directory flag, and the MIME
//! type guessed from the file name.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::fs::entry::Entry;
use crate::storage::StorageRoots;

/// What an entry is, as far as the picker cares.
///
/// Variants are listed in precedence order: when several criteria match,
/// the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    DeviceStorage,
    SdStorage,
    Directory,
    Image,
    Audio,
    Video,
    Pdf,
    Unknown,
}

impl FileType {
    /// Returns `true` for types a user navigates into rather than selects.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            FileType::DeviceStorage | FileType::SdStorage | FileType::Directory
        )
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileType::DeviceStorage => "device storage",
            FileType::SdStorage => "external storage",
            FileType::Directory => "directory",
            FileType::Image => "image",
            FileType::Audio => "audio",
            FileType::Video => "video",
            FileType::Pdf => "pdf",
            FileType::Unknown => "file",
        };
        f.write_str(s)
    }
}

/// Which kind of storage root a path is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Device,
    External,
}

/// How external storage roots are recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootDetection {
    /// Any path shaped like `/storage/<name>` or `/mnt/<name>`.
    #[default]
    Pattern,
    /// Only the enumerated external roots. Falls back to the pattern when
    /// nothing was enumerated.
    Enumerated,
}

fn storage_root_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)/(storage|mnt)/[^/]*$").expect("storage root pattern is valid")
    })
}

/// Classifies entries against a resolved set of storage roots.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    device_root: Option<PathBuf>,
    external_roots: Vec<PathBuf>,
    detection: RootDetection,
}

impl Classifier {
    pub fn new(roots: &StorageRoots, detection: RootDetection) -> Self {
        Self {
            device_root: roots.device().map(Path::to_path_buf),
            external_roots: roots.external().to_vec(),
            detection,
        }
    }

    /// Returns which storage root `path` is, if it is one.
    ///
    /// The device root is matched by exact equality and always wins over the
    /// external check.
    pub fn root_kind(&self, path: &Path) -> Option<RootKind> {
        if self.device_root.as_deref() == Some(path) {
            return Some(RootKind::Device);
        }
        if self.is_external_root(path) {
            return Some(RootKind::External);
        }
        None
    }

    fn is_external_root(&self, path: &Path) -> bool {
        let use_pattern = match self.detection {
            RootDetection::Pattern => true,
            RootDetection::Enumerated => self.external_roots.is_empty(),
        };
        if use_pattern {
            storage_root_pattern().is_match(&path.to_string_lossy())
        } else {
            self.external_roots.iter().any(|root| root == path)
        }
    }

    /// Maps `entry` to its [`FileType`].
    pub fn classify(&self, entry: &Entry) -> FileType {
        match self.root_kind(entry.path()) {
            Some(RootKind::Device) => return FileType::DeviceStorage,
            Some(RootKind::External) => return FileType::SdStorage,
            None => {}
        }
        if entry.is_dir() {
            return FileType::Directory;
        }

        let mime = entry.mime_type();
        if mime.starts_with("image/") {
            FileType::Image
        } else if mime.starts_with("audio/") {
            FileType::Audio
        } else if mime.starts_with("video/") {
            FileType::Video
        } else if mime.starts_with("application/pdf") {
            FileType::Pdf
        } else {
            FileType::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::accessor::NodeStat;
    use std::sync::Arc;

    const DEVICE: &str = "/storage/emulated/0";

    fn classifier(detection: RootDetection, external: &[&str]) -> Arc<Classifier> {
        let roots = StorageRoots::new(
            Some(PathBuf::from(DEVICE)),
            external.iter().map(PathBuf::from).collect(),
        );
        Arc::new(Classifier::new(&roots, detection))
    }

    fn file(path: &str, classifier: &Arc<Classifier>) -> Entry {
        let stat = NodeStat {
            exists: true,
            size_bytes: 1,
            ..NodeStat::default()
        };
        Entry::from_stat(PathBuf::from(path), stat, Arc::clone(classifier))
    }

    fn dir(path: &str, classifier: &Arc<Classifier>) -> Entry {
        let stat = NodeStat {
            exists: true,
            is_dir: true,
            ..NodeStat::default()
        };
        Entry::from_stat(PathBuf::from(path), stat, Arc::clone(classifier))
    }

    #[test]
    fn device_root_wins_over_pattern_and_directory() {
        let c = classifier(RootDetection::Pattern, &[]);
        assert_eq!(c.classify(&dir(DEVICE, &c)), FileType::DeviceStorage);
    }

    #[test]
    fn device_root_is_device_even_when_stat_failed() {
        let c = classifier(RootDetection::Pattern, &[]);
        let entry = Entry::from_stat(
            PathBuf::from(DEVICE),
            NodeStat::missing(),
            Arc::clone(&c),
        );
        assert_eq!(c.classify(&entry), FileType::DeviceStorage);
    }

    #[test]
    fn pattern_matches_storage_and_mnt_roots() {
        let c = classifier(RootDetection::Pattern, &[]);
        for path in ["/storage/1A2B-3C4D", "/mnt/usb", "/STORAGE/Card", "/Mnt/sd"] {
            assert_eq!(c.classify(&dir(path, &c)), FileType::SdStorage, "{path}");
        }
    }

    #[test]
    fn pattern_does_not_match_nested_paths() {
        let c = classifier(RootDetection::Pattern, &[]);
        assert_eq!(
            c.classify(&dir("/storage/1A2B-3C4D/Music", &c)),
            FileType::Directory
        );
        assert_eq!(
            c.classify(&dir("/storage/emulated/0/DCIM", &c)),
            FileType::Directory
        );
    }

    #[test]
    fn enumerated_detection_only_accepts_known_roots() {
        let c = classifier(RootDetection::Enumerated, &["/storage/1A2B-3C4D"]);
        assert_eq!(c.classify(&dir("/storage/1A2B-3C4D", &c)), FileType::SdStorage);
        assert_eq!(c.classify(&dir("/mnt/usb", &c)), FileType::Directory);
    }

    #[test]
    fn enumerated_detection_falls_back_to_pattern_when_empty() {
        let c = classifier(RootDetection::Enumerated, &[]);
        assert_eq!(c.classify(&dir("/mnt/usb", &c)), FileType::SdStorage);
    }

    #[test]
    fn plain_directory() {
        let c = classifier(RootDetection::Pattern, &[]);
        assert_eq!(c.classify(&dir("/home/user/docs", &c)), FileType::Directory);
    }

    #[test]
    fn mime_based_types() {
        let c = classifier(RootDetection::Pattern, &[]);
        assert_eq!(c.classify(&file("/d/photo.JPG", &c)), FileType::Image);
        assert_eq!(c.classify(&file("/d/song.mp3", &c)), FileType::Audio);
        assert_eq!(c.classify(&file("/d/clip.mp4", &c)), FileType::Video);
        assert_eq!(c.classify(&file("/d/paper.pdf", &c)), FileType::Pdf);
    }

    #[test]
    fn unrecognised_files_are_unknown() {
        let c = classifier(RootDetection::Pattern, &[]);
        assert_eq!(c.classify(&file("/d/README", &c)), FileType::Unknown);
        assert_eq!(c.classify(&file("/d/data.zzqx", &c)), FileType::Unknown);
        assert_eq!(c.classify(&file("/d/notes.txt", &c)), FileType::Unknown);
    }

    #[test]
    fn directory_named_like_an_image_is_a_directory() {
        let c = classifier(RootDetection::Pattern, &[]);
        assert_eq!(c.classify(&dir("/d/album.png", &c)), FileType::Directory);
    }

    #[test]
    fn root_kind_without_device_root() {
        let c = Classifier::default();
        assert_eq!(c.root_kind(Path::new("/storage/emulated/0")), None);
        assert_eq!(c.root_kind(Path::new("/mnt/usb")), Some(RootKind::External));
    }

    #[test]
    fn container_types() {
        assert!(FileType::DeviceStorage.is_container());
        assert!(FileType::Directory.is_container());
        assert!(!FileType::Pdf.is_container());
    }
}
