//! State shared by every model configuration of one admin context

use crate::field_type::{FieldBehavior, FieldTypeRegistry};
use admiral_core::types::{AbstractModel, ModelIntrospection};
use admiral_core::{CanonicalKey, Settings};
use parking_lot::{RwLock, RwLockReadGuard};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Global settings, field types and introspection, plus a generation counter
///
/// The generation moves forward on every settings or field type change;
/// cached field lists computed under an older generation are stale.
pub struct ModelEnvironment {
    settings: RwLock<Settings>,
    field_types: RwLock<FieldTypeRegistry>,
    introspection: Arc<dyn ModelIntrospection>,
    generation: AtomicU64,
}

impl ModelEnvironment {
    pub fn new(settings: Settings, introspection: Arc<dyn ModelIntrospection>) -> Self {
        Self {
            settings: RwLock::new(settings),
            field_types: RwLock::new(FieldTypeRegistry::default()),
            introspection,
            generation: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> RwLockReadGuard<'_, Settings> {
        self.settings.read()
    }

    /// Mutate the settings
    pub fn update_settings<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> R {
        let result = f(&mut self.settings.write());
        self.bump();
        result
    }

    pub fn field_types(&self) -> RwLockReadGuard<'_, FieldTypeRegistry> {
        self.field_types.read()
    }

    pub fn register_field_type(&self, tag: impl Into<String>, behavior: FieldBehavior) {
        self.field_types.write().register(tag, behavior);
        self.bump();
    }

    /// Abstract model for `key`, if introspection knows it
    pub fn lookup(&self, key: &CanonicalKey) -> Option<AbstractModel> {
        self.introspection.lookup(key)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl fmt::Debug for ModelEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEnvironment")
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}
