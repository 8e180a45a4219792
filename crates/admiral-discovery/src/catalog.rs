//! In-memory model catalog
//!
//! Holds the schema of every model the host knows about. Serves as the
//! introspection collaborator and, for hosts without model source roots, as
//! the discovery collaborator too.

use crate::RESERVED_NAMESPACE;
use admiral_core::types::{AbstractModel, ModelDiscovery, ModelIntrospection, ModelSchema};
use admiral_core::{CanonicalKey, Error, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Catalog as written in YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub models: Vec<ModelSchema>,
}

/// Model schemas keyed by canonical key, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: IndexMap<CanonicalKey, Arc<ModelSchema>>,
}

impl ModelCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema, replacing any previous schema of the same name
    pub fn insert(&mut self, schema: ModelSchema) -> Result<CanonicalKey> {
        let key = admiral_core::types::resolve(&schema)?;
        if self.models.insert(key.clone(), Arc::new(schema)).is_some() {
            debug!("Replaced schema for model {}", key);
        }
        Ok(key)
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_model(mut self, schema: ModelSchema) -> Result<Self> {
        self.insert(schema)?;
        Ok(self)
    }

    /// Parse a catalog from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml_ng::from_str(content)?;
        let mut catalog = Self::new();
        for schema in file.models {
            catalog.insert(schema)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a YAML file
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        let catalog = Self::from_yaml(&content)?;
        debug!("Loaded {} model schemas from {}", catalog.len(), path);
        Ok(catalog)
    }

    /// Number of models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Schema for a key
    pub fn get(&self, key: &CanonicalKey) -> Option<&Arc<ModelSchema>> {
        self.models.get(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.models.keys()
    }
}

impl ModelIntrospection for ModelCatalog {
    fn lookup(&self, key: &CanonicalKey) -> Option<AbstractModel> {
        self.models
            .get(key)
            .map(|schema| AbstractModel::new(schema.clone()))
    }
}

impl ModelDiscovery for ModelCatalog {
    fn discover_model_names(&self) -> Result<Vec<String>> {
        Ok(self
            .models
            .keys()
            .filter(|key| {
                let reserved = key.as_str().starts_with(RESERVED_NAMESPACE);
                if reserved {
                    warn!("Ignoring model in reserved namespace: {}", key);
                }
                !reserved
            })
            .map(|key| key.to_string())
            .collect())
    }
}
