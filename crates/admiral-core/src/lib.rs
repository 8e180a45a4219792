//! # admiral-core
//!
//! Core library for admiral providing:
//! - Canonical model keys and reference resolution
//! - Model schema types and the discovery/introspection collaborator contracts
//! - Request bindings and the authorization/auditing/configuration adapter contracts
//! - Global settings with their hard-coded defaults and a layered settings loader

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::{Settings, SettingsFile, SettingsLoader};
pub use error::{BoxError, Error, Result};
pub use types::{AbstractModel, Bindings, CanonicalKey, ModelRef, RequestContext};
