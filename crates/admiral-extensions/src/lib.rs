//! # admiral-extensions
//!
//! Extension point for authorization, auditing and configuration adapters:
//! - [`ExtensionRegistry`] maps extension names to adapter classes per capability
//! - [`RequestHooks`] holds the hooks run against every admin request
//!   (`authenticate_with`, `authorize_with`, `audit_with`, `current_user_method`)
//!
//! Adapter implementations are not part of this crate; hosts register them.

pub mod adapter;
pub mod capabilities;
pub mod hooks;
pub mod registry;

pub use adapter::{
    AdapterClass, AuditingAdapterClass, AuthorizationAdapterClass, ConfigurationAdapterClass,
    ExtensionModule,
};
pub use capabilities::Capabilities;
pub use hooks::{CurrentUserHook, HookResult, RequestHook, RequestHooks};
pub use registry::ExtensionRegistry;
