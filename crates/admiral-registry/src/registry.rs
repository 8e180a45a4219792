//! Map from canonical key to lazy model configuration

use crate::environment::ModelEnvironment;
use crate::lazy_model::LazyModelConfig;
use admiral_core::CanonicalKey;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Model configurations in first-reference order
#[derive(Debug)]
pub struct ModelRegistry {
    env: Arc<ModelEnvironment>,
    models: RwLock<IndexMap<CanonicalKey, Arc<LazyModelConfig>>>,
}

impl ModelRegistry {
    pub fn new(env: Arc<ModelEnvironment>) -> Self {
        Self {
            env,
            models: RwLock::new(IndexMap::new()),
        }
    }

    /// Fetch the configuration for `key`, creating it on first reference
    pub fn get_or_create(&self, key: &CanonicalKey) -> Arc<LazyModelConfig> {
        if let Some(config) = self.models.read().get(key) {
            return config.clone();
        }

        self.models
            .write()
            .entry(key.clone())
            .or_insert_with(|| {
                debug!(model = %key, "Registered model configuration");
                Arc::new(LazyModelConfig::new(key.clone(), self.env.clone()))
            })
            .clone()
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<Arc<LazyModelConfig>> {
        self.models.read().get(key).cloned()
    }

    /// Remove one configuration; returns whether it existed
    pub fn remove(&self, key: &CanonicalKey) -> bool {
        self.models.write().shift_remove(key).is_some()
    }

    pub fn clear(&self) {
        self.models.write().clear();
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    /// Keys in first-reference order
    pub fn keys(&self) -> Vec<CanonicalKey> {
        self.models.read().keys().cloned().collect()
    }
}
