//! Common test utilities for admiral-extensions
//!
//! Mock adapters standing in for real authorization/auditing/configuration
//! extensions.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;
