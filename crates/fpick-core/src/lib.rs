//! fpick core library: UI-agnostic file and directory picking.
//!
//! `fpick-core` holds everything a picker needs except drawing: a
//! filesystem abstraction, memoizing [`Entry`] values, storage root
//! discovery, type classification, a breadcrumb [`NavigationStack`], and
//! the [`PickerController`] state machine that ties them together. Hosts
//! render from [`PickerView`] snapshots and receive selections through a
//! [`SelectionListener`].
//!
//! # Modules
//!
//! - [`fs`]: Filesystem access ([`FileSystem`], [`LocalFileSystem`],
//!   [`MemoryFileSystem`]), [`Entry`], size labels.
//! - [`classify`]: [`FileType`] classification and storage root detection.
//! - [`storage`]: Storage root enumeration and validation ([`StorageRootResolver`]).
//! - [`nav`]: Navigation stack and directory listing.
//! - [`controller`]: The picker session ([`PickerController`]).
//! - [`config`]: TOML-based settings.
//! - [`event`]: Command and outcome types for UI ↔ Core communication.
//! - [`error`]: Unified error type ([`PickerError`]) and result alias ([`PickerResult`]).

pub mod classify;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;
pub mod storage;

pub use classify::{Classifier, FileType, RootDetection, RootKind};
pub use config::settings::Config;
pub use controller::{Navigation, PickerController, PickerView, SelectionListener};
pub use error::{PickerError, PickerResult};
pub use event::{Command, Outcome};
pub use fs::{format_size, Entry, FileSystem, LocalFileSystem, MemoryFileSystem, NodeStat};
pub use nav::lister::{DirectoryLister, Listing, SelectionMode};
pub use nav::stack::NavigationStack;
pub use storage::{
    ConfiguredStorage, Resolution, StorageProvider, StorageRootResolver, StorageRoots,
};
