//! Configuration management for fpick.
//!
//! Picker defaults and storage enumeration ([`settings::Config`]) are stored
//! as a TOML file and loaded at startup.

pub mod settings;

pub use settings::{Config, PickerConfig, StorageConfig};
