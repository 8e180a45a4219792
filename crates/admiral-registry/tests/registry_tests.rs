//! Registry lifecycle: model lookup, pools, resets and settings

mod common;

use admiral_core::types::{AbstractModel, ModelRef, SearchOperator};
use admiral_core::{CanonicalKey, Error};
use admiral_registry::Section;
use common::*;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use test_case::test_case;

struct Team;

#[test]
fn test_model_references_share_one_config() {
    let admin = sample_admin();
    let catalog = sample_catalog();
    let schema = catalog.get(&CanonicalKey::new("Team").unwrap()).unwrap().clone();
    let abstract_model = AbstractModel::new(schema.clone());

    let by_name = admin.model("Team").unwrap();
    let by_string = admin.model(String::from("Team")).unwrap();
    let by_schema = admin.model(&schema).unwrap();
    let by_abstract = admin.model(&abstract_model).unwrap();
    let by_instance = admin.model(ModelRef::of(&Team)).unwrap();

    for other in [&by_string, &by_schema, &by_abstract, &by_instance] {
        assert!(Arc::ptr_eq(&by_name, other));
    }
    assert_eq!(admin.registered_models().len(), 1);
}

#[test]
fn test_unresolvable_reference() {
    let admin = sample_admin();
    let err = admin.model("").unwrap_err();
    assert!(matches!(err, Error::UnresolvableModel { .. }));
}

#[test]
fn test_model_does_not_force_evaluation() {
    let admin = sample_admin();
    let team = admin
        .model_with("Team", |m| {
            m.weight(4);
        })
        .unwrap();

    assert_eq!(team.pending_blocks(), 1);
    assert!(!team.is_flushed());
}

#[test]
fn test_models_pool_is_deduplicated_sorted_and_skips_concerns() {
    let admin = sample_admin();
    admin.update_settings(|s| s.set_excluded_models(["Fan"]));

    let pool = admin.models_pool().unwrap();
    assert!(!pool.iter().any(|m| m.starts_with("Concerns::")));
    assert!(!pool.contains(&"Fan".to_string()));
    assert_eq!(pool.iter().filter(|m| *m == "Team").count(), 1);

    let mut sorted = pool.clone();
    sorted.sort();
    assert_eq!(pool, sorted);
}

#[test]
fn test_models_pool_ignores_allowlist() {
    let admin = sample_admin();
    admin.update_settings(|s| s.set_included_models(["Team"]));

    assert_eq!(admin.models_pool().unwrap().len(), SAMPLE_MODELS.len());
    assert_eq!(admin.models().unwrap().len(), 1);
}

#[test]
fn test_models_apply_allowlist_then_blocklist() {
    let admin = sample_admin();
    admin.update_settings(|s| {
        s.set_included_models(["Team", "League"]);
        s.set_excluded_models(["Team"]);
    });

    let models: Vec<String> = admin
        .models()
        .unwrap()
        .iter()
        .map(|m| m.key().to_string())
        .collect();
    assert_eq!(models, vec!["League"]);
}

#[test]
fn test_models_skip_names_without_schema() {
    let admin = sample_admin();
    admin.update_settings(|s| s.set_included_models(["Team", "Ghost"]));

    let models = admin.models().unwrap();
    assert_eq!(models.len(), 1);
    assert!(!admin
        .registered_models()
        .iter()
        .any(|k| k.as_str() == "Ghost"));
}

#[test]
fn test_excluded_flag() {
    let admin = sample_admin();
    let team = admin.model("Team").unwrap();
    assert!(!team.is_excluded());

    admin.update_settings(|s| s.set_included_models(["League"]));
    assert!(team.is_excluded());
}

#[test]
fn test_reset_restores_defaults_and_clears_registry() {
    let (admin, discovery) = sample_admin_with_discovery();
    admin.set_default_search_operator("starts_with").unwrap();
    admin
        .model_with("Team", |m| {
            m.field("name", |_| {});
        })
        .unwrap();

    admin.reset();

    assert_eq!(
        admin.settings().default_search_operator(),
        SearchOperator::Default
    );
    assert!(admin.registered_models().is_empty());
    let team = admin.model("Team").unwrap();
    assert_eq!(team.pending_blocks(), 0);
    let fields = team.fields_for(Section::List).unwrap();
    assert!(fields.iter().any(|f| f.name() == "revenue"));
    assert!(discovery.reset_count() >= 1);
}

#[test]
fn test_reset_model_only_drops_one_entry() {
    let admin = sample_admin();
    let team = admin
        .model_with("Team", |m| {
            m.label("Squad");
        })
        .unwrap();
    admin.model("League").unwrap();

    assert!(admin.reset_model("Team").unwrap());
    assert!(!admin.reset_model("Team").unwrap());

    let fresh = admin.model("Team").unwrap();
    assert!(!Arc::ptr_eq(&team, &fresh));
    assert_eq!(fresh.label().unwrap(), "Team");
    assert_eq!(admin.registered_models().len(), 2);
}

#[test]
fn test_reset_all_models_keeps_settings() {
    let (admin, discovery) = sample_admin_with_discovery();
    admin.update_settings(|s| s.default_items_per_page = 50);
    admin.model("Team").unwrap();

    admin.reset_all_models();

    assert!(admin.registered_models().is_empty());
    assert_eq!(admin.settings().default_items_per_page, 50);
    assert_eq!(discovery.reset_count(), 1);
}

#[test_case("default", SearchOperator::Default)]
#[test_case("like", SearchOperator::Like)]
#[test_case("starts_with", SearchOperator::StartsWith)]
#[test_case("ends_with", SearchOperator::EndsWith)]
#[test_case("is", SearchOperator::Is)]
#[test_case("=", SearchOperator::Equals)]
fn test_valid_search_operators(operator: &str, expected: SearchOperator) {
    let admin = sample_admin();
    admin.set_default_search_operator(operator).unwrap();
    assert_eq!(admin.settings().default_search_operator(), expected);
}

#[test]
fn test_invalid_search_operator_keeps_previous() {
    let admin = sample_admin();
    admin.set_default_search_operator("like").unwrap();

    let err = admin.set_default_search_operator("random").unwrap_err();
    assert!(matches!(err, Error::InvalidOption { .. }));
    assert_eq!(
        admin.settings().default_search_operator(),
        SearchOperator::Like
    );
}

#[test]
fn test_discovery_scanned_per_enumeration() {
    let (admin, discovery) = sample_admin_with_discovery();
    admin.models_pool().unwrap();
    admin.models().unwrap();
    assert_eq!(discovery.scans.load(Ordering::SeqCst), 2);
}
