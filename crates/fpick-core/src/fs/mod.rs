//! File system abstractions for fpick.
//!
//! This module provides the [`accessor::FileSystem`] trait the picker reads
//! through, two implementations ([`local::LocalFileSystem`] and
//! [`memory::MemoryFileSystem`]), the memoizing [`entry::Entry`] wrapper,
//! and size formatting ([`size::format_size`]).

pub mod accessor;
pub mod entry;
pub mod local;
pub mod memory;
pub mod size;

pub use accessor::{FileSystem, NodeStat};
pub use entry::Entry;
pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;
pub use size::format_size;
