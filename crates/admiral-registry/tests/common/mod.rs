//! Common test utilities for admiral-registry
//!
//! This module provides shared test infrastructure including:
//! - A sample application schema (teams, leagues, players, embedded types)
//! - Mock discovery and authorization collaborators
//! - Binding builders

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
