//! Navigation logic for fpick.
//!
//! This module contains the breadcrumb [`stack::NavigationStack`] and the
//! [`lister::DirectoryLister`], which turns a directory into filtered
//! [`Entry`](crate::fs::entry::Entry) values.

pub mod lister;
pub mod stack;
