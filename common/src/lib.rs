//! The `common` crate provides the building blocks shared by the training VM management
//! scripts: reading the output of the listing helper, the typed model of the Ansible-style
//! inventory file, merging both into per-VM records and writing the export files.

pub mod clap;
mod error;
pub mod export;
pub mod generators;
pub mod inventory;
pub mod listing;
pub mod tracing;
pub mod vm_info;
pub mod vm_name;

pub use error::Error;

/// Placeholder written wherever a field has no source for a given VM.
pub const NOT_FOUND: &str = "Not found";
