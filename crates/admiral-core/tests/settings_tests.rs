//! Settings layering and model references from outside the crate

use admiral_core::types::{resolve, AbstractModel, ModelRef, ModelSchema, SearchOperator};
use admiral_core::{CanonicalKey, Error, Settings, SettingsFile, SettingsLoader};
use camino::Utf8PathBuf;
use serial_test::serial;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn loader_with(content: Option<&str>) -> (TempDir, SettingsLoader) {
    let dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    if let Some(content) = content {
        fs::write(path.join("admiral.yml"), content).unwrap();
    }
    (dir, SettingsLoader::with_dir(path))
}

#[test]
#[serial]
fn test_yml_file_is_found() {
    let (_dir, loader) = loader_with(Some(
        r#"
included_models: [Team, League]
default_hidden_fields:
  base: [secret]
  edit: [id]
  show: []
navigation_static_links:
  Docs: https://example.com/docs
"#,
    ));

    let settings = loader.load("dummy_app").unwrap();
    assert_eq!(settings.included_models, vec!["Team", "League"]);
    assert_eq!(settings.default_hidden_fields.base, vec!["secret"]);
    assert!(settings.default_hidden_fields.show.is_empty());
    assert_eq!(
        settings.navigation_static_links.get("Docs").map(String::as_str),
        Some("https://example.com/docs")
    );
    assert_eq!(settings.main_app_name(), ["Dummy App".to_string(), "Admin".to_string()]);
}

#[test]
#[serial]
fn test_unknown_key_is_rejected() {
    let (_dir, loader) = loader_with(Some("items_per_page: 10\n"));
    let err = loader.load("dummy_app").unwrap_err();
    match err {
        Error::InvalidConfig { message } => {
            assert!(message.contains("admiral.yml"), "{}", message);
            assert!(message.contains("items_per_page"), "{}", message);
        }
        other => panic!("expected InvalidConfig, got {:?}", other),
    }

    let err = SettingsFile::from_yaml("items_per_page: 10\n").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
}

#[test]
fn test_plain_hidden_list_covers_edit_and_show() {
    let overlay = SettingsFile::from_yaml("default_hidden_fields: [notes]\n").unwrap();
    let mut settings = Settings::default();
    overlay.apply_to(&mut settings).unwrap();

    assert!(settings.default_hidden_fields.base.is_empty());
    assert_eq!(settings.default_hidden_fields.edit, vec!["notes"]);
    assert_eq!(settings.default_hidden_fields.show, vec!["notes"]);
}

#[test]
fn test_reset_keeps_engine_name() {
    let mut settings = Settings::for_application("shop");
    settings.set_default_search_operator("ends_with").unwrap();
    settings.set_excluded_models(["Order"]);

    settings.reset();

    assert_eq!(settings.engine_name(), "shop");
    assert_eq!(settings.default_search_operator(), SearchOperator::Default);
    assert!(settings.excluded_models.is_empty());
}

#[test]
fn test_allowlist_and_blocklist() {
    let mut settings = Settings::default();
    let team = CanonicalKey::new("Team").unwrap();
    let league = CanonicalKey::new("League").unwrap();
    assert!(!settings.is_excluded(&team));

    settings.set_included_models(["Team", "League"]);
    settings.set_excluded_models(["Team"]);
    assert!(settings.is_excluded(&team));
    assert!(!settings.is_excluded(&league));
}

#[test]
fn test_namespaced_references() {
    let schema = Arc::new(ModelSchema::new("Blog::Post"));
    let model = AbstractModel::new(schema.clone());

    let by_name = resolve("Blog::Post").unwrap();
    assert_eq!(by_name, resolve(&model).unwrap());
    assert_eq!(by_name, resolve(&schema).unwrap());
    assert_eq!(ModelRef::from(&by_name).name(), "Blog::Post");
}
