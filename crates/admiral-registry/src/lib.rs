//! # admiral-registry
//!
//! The model configuration registry at the heart of admiral:
//! - Deferred configuration blocks per model, boot-time blocks first
//! - Lazy model configs that replay their blocks on first read and cache
//!   per-section field lists
//! - Request-bound configs and the visibility pipeline that orders the
//!   models a request may see
//! - [`AdminContext`], the application object owning settings, registry,
//!   extensions and hooks

pub mod bound;
pub mod builder;
pub mod context;
pub mod declaration;
pub mod environment;
pub mod field;
pub mod field_type;
pub mod lazy_model;
pub mod queue;
pub mod registry;
pub mod rule;
pub mod section;
pub mod visibility;

pub use bound::BoundModelConfig;
pub use builder::{FieldBuilder, ModelBuilder, SectionBuilder};
pub use context::AdminContext;
pub use field::FieldConfig;
pub use field_type::{FieldBehavior, FieldTypeRegistry};
pub use lazy_model::LazyModelConfig;
pub use queue::{BlockOrigin, ConfigBlock, DeferredBlock, DeferredQueue};
pub use registry::ModelRegistry;
pub use rule::Rule;
pub use section::Section;
