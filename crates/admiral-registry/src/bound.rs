//! Model configuration specialized to one request

use crate::field::FieldConfig;
use crate::lazy_model::LazyModelConfig;
use crate::section::Section;
use admiral_core::types::{AbstractModel, AdminAction};
use admiral_core::{Bindings, CanonicalKey, Error, Result};
use std::sync::Arc;

/// A model configuration paired with request bindings
///
/// Reads go through the shared [`LazyModelConfig`]; nothing here mutates it.
#[derive(Debug, Clone)]
pub struct BoundModelConfig {
    config: Arc<LazyModelConfig>,
    bindings: Bindings,
}

impl BoundModelConfig {
    pub(crate) fn new(config: Arc<LazyModelConfig>, bindings: Bindings) -> Self {
        let bindings = bindings.with_abstract_model(config.abstract_model().cloned());
        Self { config, bindings }
    }

    pub fn key(&self) -> &CanonicalKey {
        self.config.key()
    }

    /// The shared configuration
    pub fn config(&self) -> &Arc<LazyModelConfig> {
        &self.config
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn abstract_model(&self) -> Option<&AbstractModel> {
        self.config.abstract_model()
    }

    pub fn visible(&self) -> Result<bool> {
        self.config.visible_for(&self.bindings)
    }

    pub fn weight(&self) -> Result<i32> {
        self.config.weight_for(&self.bindings)
    }

    pub fn label(&self) -> Result<String> {
        self.config.label_for(&self.bindings)
    }

    pub fn label_plural(&self) -> Result<String> {
        self.config.label_plural_for(&self.bindings)
    }

    /// Whether the request may perform `action` on this model
    ///
    /// Without an authorization adapter every action is allowed.
    pub fn is_authorized(&self, action: AdminAction) -> Result<bool> {
        match self.bindings.authorization_adapter() {
            Some(adapter) => adapter
                .authorized(action, self.abstract_model())
                .map_err(|e| Error::predicate(self.key().as_str(), "authorization", e)),
            None => Ok(true),
        }
    }

    /// Every field of `section`, visible or not
    pub fn fields(&self, section: Section) -> Result<Arc<Vec<FieldConfig>>> {
        self.config.fields_for(section)
    }

    /// Fields of `section` visible under these bindings
    pub fn visible_fields(&self, section: Section) -> Result<Vec<FieldConfig>> {
        let mut visible = Vec::new();
        for field in self.fields(section)?.iter() {
            if field.is_visible(&self.bindings)? {
                visible.push(field.clone());
            }
        }
        Ok(visible)
    }
}
