//! # admiral-discovery
//!
//! Collaborators that tell the registry which models exist and what they look like:
//! - [`FsModelDiscovery`] scans model source roots once and memoizes the names
//! - [`ModelCatalog`] holds model schemas in memory (or loaded from YAML) and
//!   answers introspection lookups

pub mod catalog;
pub mod filesystem;

pub use catalog::{CatalogFile, ModelCatalog};
pub use filesystem::FsModelDiscovery;
pub use admiral_core::types::RESERVED_NAMESPACE;
