//! Layered settings loader
//!
//! Settings are built from the following sources (low to high precedence):
//! 1. Hard-coded defaults
//! 2. Settings file (`<config dir>/admiral.yaml` or `admiral.yml`)
//! 3. Environment variables (ADMIRAL_* prefix)

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::types::{DefaultHiddenFields, ForgeryProtection, MainAppName, Sidescroll};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

/// Settings file names searched in the config directory
const SETTINGS_FILE_NAMES: &[&str] = &["admiral.yaml", "admiral.yml"];

/// Hidden fields as written in a settings file: a list or a per-section map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HiddenFieldsValue {
    List(Vec<String>),
    Sections(DefaultHiddenFields),
}

impl From<HiddenFieldsValue> for DefaultHiddenFields {
    fn from(value: HiddenFieldsValue) -> Self {
        match value {
            HiddenFieldsValue::List(fields) => DefaultHiddenFields::for_views(fields),
            HiddenFieldsValue::Sections(sections) => sections,
        }
    }
}

/// Settings overlay as read from YAML; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_app_name: Option<[String; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_hidden_fields: Option<HiddenFieldsValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_items_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_associated_collection_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_search_operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_show_view: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_validations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_columns_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidescroll: Option<Sidescroll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_controller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forgery_protection_settings: Option<ForgeryProtection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_gravatar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_static_links: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_static_label: Option<String>,
}

impl SettingsFile {
    /// Parse an overlay from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Full snapshot of effective settings, resolving a dynamic app name
    pub fn snapshot(settings: &Settings) -> Self {
        Self {
            main_app_name: Some(settings.main_app_name()),
            included_models: Some(settings.included_models.clone()),
            excluded_models: Some(settings.excluded_models.clone()),
            default_hidden_fields: Some(HiddenFieldsValue::Sections(
                settings.default_hidden_fields.clone(),
            )),
            default_items_per_page: Some(settings.default_items_per_page),
            default_associated_collection_limit: Some(settings.default_associated_collection_limit),
            default_search_operator: Some(settings.default_search_operator().to_string()),
            label_methods: Some(settings.label_methods.clone()),
            compact_show_view: Some(settings.compact_show_view),
            browser_validations: Some(settings.browser_validations),
            total_columns_width: Some(settings.total_columns_width),
            sidescroll: settings.sidescroll,
            parent_controller: Some(settings.parent_controller.clone()),
            forgery_protection_settings: Some(settings.forgery_protection_settings),
            show_gravatar: Some(settings.show_gravatar),
            navigation_static_links: Some(settings.navigation_static_links.clone()),
            navigation_static_label: settings.navigation_static_label.clone(),
        }
    }

    /// Apply the overlay through the validating setters
    ///
    /// Validation happens before any field is written, so a rejected overlay
    /// leaves `settings` untouched.
    pub fn apply_to(self, settings: &mut Settings) -> Result<()> {
        let mut next = settings.clone();

        if let Some(operator) = &self.default_search_operator {
            next.set_default_search_operator(operator)?;
        }
        if let Some(pair) = self.main_app_name {
            next.main_app_name = MainAppName::Static(pair);
        }
        if let Some(models) = self.included_models {
            next.set_included_models(models);
        }
        if let Some(models) = self.excluded_models {
            next.set_excluded_models(models);
        }
        if let Some(hidden) = self.default_hidden_fields {
            next.set_default_hidden_fields(hidden);
        }
        if let Some(value) = self.default_items_per_page {
            next.default_items_per_page = value;
        }
        if let Some(value) = self.default_associated_collection_limit {
            next.default_associated_collection_limit = value;
        }
        if let Some(value) = self.label_methods {
            next.label_methods = value;
        }
        if let Some(value) = self.compact_show_view {
            next.compact_show_view = value;
        }
        if let Some(value) = self.browser_validations {
            next.browser_validations = value;
        }
        if let Some(value) = self.total_columns_width {
            next.total_columns_width = value;
        }
        if self.sidescroll.is_some() {
            next.sidescroll = self.sidescroll;
        }
        if let Some(value) = self.parent_controller {
            next.parent_controller = value;
        }
        if let Some(value) = self.forgery_protection_settings {
            next.forgery_protection_settings = value;
        }
        if let Some(value) = self.show_gravatar {
            next.show_gravatar = value;
        }
        if let Some(value) = self.navigation_static_links {
            next.navigation_static_links = value;
        }
        if self.navigation_static_label.is_some() {
            next.navigation_static_label = self.navigation_static_label;
        }

        *settings = next;
        Ok(())
    }
}

/// Builds settings from defaults, a settings file and the environment
pub struct SettingsLoader {
    /// Directory searched for the settings file
    config_dir: Utf8PathBuf,
}

impl SettingsLoader {
    /// Loader for the standard config directory (`<user config dir>/admiral`)
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::invalid_config("Could not determine config directory"))?;
        let base = Utf8PathBuf::from_path_buf(base)
            .map_err(|_| Error::invalid_config("Config directory path is not valid UTF-8"))?;
        Ok(Self::with_dir(base.join("admiral")))
    }

    /// Loader for a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Directory searched for the settings file
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Load settings for a host application
    pub fn load(&self, engine_name: &str) -> Result<Settings> {
        let mut settings = Settings::for_application(engine_name);

        if let Some(path) = self.find_settings_file() {
            debug!("Loading settings from {}", path);
            Self::load_file(&path)?.apply_to(&mut settings)?;
        }

        Self::env_overlay()?.apply_to(&mut settings)?;
        Ok(settings)
    }

    /// Read one settings file
    pub fn load_file(path: &Utf8Path) -> Result<SettingsFile> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        SettingsFile::from_yaml(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    fn find_settings_file(&self) -> Option<Utf8PathBuf> {
        SETTINGS_FILE_NAMES
            .iter()
            .map(|name| self.config_dir.join(name))
            .find(|path| path.exists())
    }

    /// Overlay built from ADMIRAL_* environment variables
    fn env_overlay() -> Result<SettingsFile> {
        let mut overlay = SettingsFile::default();

        if let Ok(val) = env::var("ADMIRAL_ITEMS_PER_PAGE") {
            overlay.default_items_per_page = Some(val.parse().map_err(|_| {
                Error::invalid_config("ADMIRAL_ITEMS_PER_PAGE must be a valid number")
            })?);
        }

        if let Ok(val) = env::var("ADMIRAL_SEARCH_OPERATOR") {
            overlay.default_search_operator = Some(val);
        }

        if let Ok(val) = env::var("ADMIRAL_PARENT_CONTROLLER") {
            overlay.parent_controller = Some(val);
        }

        if let Ok(val) = env::var("ADMIRAL_INCLUDED_MODELS") {
            overlay.included_models = Some(split_list(&val));
        }

        if let Ok(val) = env::var("ADMIRAL_EXCLUDED_MODELS") {
            overlay.excluded_models = Some(split_list(&val));
        }

        Ok(overlay)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ForgeryStrategy, SearchOperator};
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (SettingsLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        (SettingsLoader::with_dir(config_dir), temp_dir)
    }

    #[test]
    #[serial]
    fn test_load_defaults_without_file() {
        let (loader, _temp) = create_temp_loader();
        let settings = loader.load("dummy_app").unwrap();
        assert_eq!(settings.default_items_per_page, 20);
        assert_eq!(settings.main_app_name()[0], "Dummy App");
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let (loader, _temp) = create_temp_loader();
        let content = r#"
main_app_name: ["Stati", "c value"]
included_models: [Team, League]
default_hidden_fields: [id, secret]
default_search_operator: starts_with
forgery_protection_settings:
  with: null_session
navigation_static_links:
  Docs: https://example.com/docs
"#;
        fs::write(loader.config_dir().join("admiral.yaml"), content).unwrap();

        let settings = loader.load("dummy_app").unwrap();
        assert_eq!(settings.main_app_name(), ["Stati".to_string(), "c value".to_string()]);
        assert_eq!(settings.included_models, vec!["Team", "League"]);
        assert!(settings.default_hidden_fields.base.is_empty());
        assert_eq!(settings.default_hidden_fields.show, vec!["id", "secret"]);
        assert_eq!(settings.default_search_operator(), SearchOperator::StartsWith);
        assert_eq!(
            settings.forgery_protection_settings.with,
            ForgeryStrategy::NullSession
        );
        assert_eq!(settings.navigation_static_links.len(), 1);
    }

    #[test]
    #[serial]
    fn test_invalid_operator_in_file_is_rejected() {
        let (loader, _temp) = create_temp_loader();
        fs::write(
            loader.config_dir().join("admiral.yml"),
            "default_search_operator: random\n",
        )
        .unwrap();

        let err = loader.load("dummy_app").unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }));
    }

    #[test]
    fn test_rejected_overlay_leaves_settings_untouched() {
        let mut settings = Settings::default();
        let overlay = SettingsFile {
            default_items_per_page: Some(50),
            default_search_operator: Some("random".to_string()),
            ..Default::default()
        };

        assert!(overlay.apply_to(&mut settings).is_err());
        assert_eq!(settings.default_items_per_page, 20);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("ADMIRAL_ITEMS_PER_PAGE", "50");
        env::set_var("ADMIRAL_EXCLUDED_MODELS", "Player, Fan");

        let settings = loader.load("dummy_app").unwrap();
        assert_eq!(settings.default_items_per_page, 50);
        assert_eq!(settings.excluded_models, vec!["Player", "Fan"]);

        env::remove_var("ADMIRAL_ITEMS_PER_PAGE");
        env::remove_var("ADMIRAL_EXCLUDED_MODELS");
    }

    #[test]
    fn test_snapshot_round_trips_through_apply() {
        let mut original = Settings::for_application("dummy_app");
        original.set_default_search_operator("is").unwrap();

        let mut copy = Settings::default();
        SettingsFile::snapshot(&original).apply_to(&mut copy).unwrap();
        assert_eq!(copy.default_search_operator(), SearchOperator::Is);
        assert_eq!(copy.main_app_name(), original.main_app_name());
    }
}
