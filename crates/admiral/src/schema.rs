//! Host application description read by the CLI
//!
//! A schema file lists models in the catalog format. Each model may carry an
//! `admin` block that is installed as boot-time configuration.

use admiral_core::types::ModelDiscovery;
use admiral_core::Settings;
use admiral_discovery::ModelCatalog;
use admiral_registry::{AdminContext, ModelBuilder};
use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Admin options attached to one model in the schema file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminOptions {
    pub weight: Option<i32>,
    pub label: Option<String>,
    pub label_plural: Option<String>,
    pub navigation_label: Option<String>,
    pub visible: Option<bool>,
    /// Only users holding one of these roles see the model
    pub visible_to_roles: Vec<String>,
}

impl AdminOptions {
    fn apply(&self, model: &mut ModelBuilder<'_>) {
        if let Some(weight) = self.weight {
            model.weight(weight);
        }
        if let Some(label) = &self.label {
            model.label(label.clone());
        }
        if let Some(label) = &self.label_plural {
            model.label_plural(label.clone());
        }
        if let Some(label) = &self.navigation_label {
            model.navigation_label(label.clone());
        }

        if self.visible == Some(false) {
            model.hide();
        } else if !self.visible_to_roles.is_empty() {
            let roles = self.visible_to_roles.clone();
            model.visible_if(move |bindings| Ok(roles.iter().any(|r| bindings.user_has_role(r))));
        } else if self.visible == Some(true) {
            model.show();
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdminEntry {
    name: String,
    #[serde(default)]
    admin: Option<AdminOptions>,
}

#[derive(Debug, Default, Deserialize)]
struct AdminFile {
    #[serde(default)]
    models: Vec<AdminEntry>,
}

/// Models of the host application plus their admin options
#[derive(Debug)]
pub struct AppSchema {
    catalog: Arc<ModelCatalog>,
    admin: Vec<(String, AdminOptions)>,
}

impl AppSchema {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog = ModelCatalog::from_yaml(content).context("Invalid model schema")?;
        let file: AdminFile = serde_yaml_ng::from_str(content).context("Invalid admin options")?;
        let admin = file
            .models
            .into_iter()
            .filter_map(|entry| entry.admin.map(|options| (entry.name, options)))
            .collect();

        Ok(Self {
            catalog: Arc::new(catalog),
            admin,
        })
    }

    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file {}", path))?;
        let schema = Self::from_yaml(&content)?;
        debug!(models = schema.catalog.len(), "Loaded schema from {}", path);
        Ok(schema)
    }

    pub fn catalog(&self) -> &Arc<ModelCatalog> {
        &self.catalog
    }

    /// Admin context over this schema with the admin options booted
    ///
    /// Models are discovered through `discovery` when given, from the schema
    /// itself otherwise.
    pub fn admin_context(
        &self,
        discovery: Option<Arc<dyn ModelDiscovery>>,
        settings: Settings,
    ) -> Result<AdminContext> {
        let discovery =
            discovery.unwrap_or_else(|| self.catalog.clone() as Arc<dyn ModelDiscovery>);
        let admin = AdminContext::with_settings(discovery, self.catalog.clone(), settings);

        let options = self.admin.clone();
        admin.boot(move |admin| {
            for (name, options) in &options {
                let options = options.clone();
                admin.model_with(name.as_str(), move |m| options.apply(m))?;
            }
            Ok(())
        })?;
        Ok(admin)
    }
}
