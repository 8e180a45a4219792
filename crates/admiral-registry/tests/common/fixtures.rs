//! Sample application schema

use super::mocks::CountingDiscovery;
use admiral_core::types::{AssociationKind, CurrentUser, ModelSchema, Property};
use admiral_core::Bindings;
use admiral_discovery::ModelCatalog;
use admiral_registry::AdminContext;
use std::sync::Arc;

/// Models every test application has
pub const SAMPLE_MODELS: &[&str] = &[
    "Team",
    "League",
    "Player",
    "Fan",
    "Comment",
    "FieldTest",
    "Embed",
    "RecursivelyEmbedsOne",
    "RecursivelyEmbedsMany",
];

pub fn sample_catalog() -> ModelCatalog {
    let schemas = vec![
        ModelSchema::new("Team")
            .with_property(Property::new("id", "integer").required())
            .with_property(Property::new("name", "string").required())
            .with_property(Property::new("logo_url", "string"))
            .with_property(Property::new("revenue", "decimal"))
            .with_property(Property::new("created_at", "datetime"))
            .with_property(Property::new("updated_at", "datetime"))
            .with_property(Property::association("league", AssociationKind::BelongsTo))
            .with_property(Property::association("players", AssociationKind::HasMany)),
        ModelSchema::new("League")
            .with_property(Property::new("id", "integer").required())
            .with_property(Property::new("name", "string").required())
            .with_property(Property::association("teams", AssociationKind::HasMany)),
        ModelSchema::new("Player")
            .with_property(Property::new("id", "integer").required())
            .with_property(Property::new("name", "string").required())
            .with_property(Property::new("number", "integer"))
            .with_property(Property::new("retired", "boolean"))
            .with_property(Property::association("team", AssociationKind::BelongsTo)),
        ModelSchema::new("Fan")
            .with_property(Property::new("id", "integer").required())
            .with_property(Property::new("name", "string"))
            .with_property(Property::association(
                "teams",
                AssociationKind::HasAndBelongsToMany,
            )),
        ModelSchema::new("Comment")
            .with_property(Property::new("id", "integer").required())
            .with_property(Property::new("content", "text")),
        ModelSchema::new("FieldTest")
            .with_property(Property::new("id", "integer").required())
            .with_property(Property::new("string_field", "string"))
            .with_property(Property::new("text_field", "text"))
            .with_property(Property::new("boolean_field", "boolean"))
            .with_property(Property::new("date_field", "date"))
            .with_property(Property::new("_type", "string"))
            .with_property(Property::new("location", "geo_point"))
            .with_property(Property::association("embeds", AssociationKind::EmbedsMany)),
        ModelSchema::new("Embed")
            .with_property(Property::new("name", "string"))
            .embedded(false),
        ModelSchema::new("RecursivelyEmbedsOne")
            .with_property(Property::association(
                "recursively_embeds_one",
                AssociationKind::EmbedsOne,
            ))
            .embedded(true),
        ModelSchema::new("RecursivelyEmbedsMany")
            .with_property(Property::association(
                "recursively_embeds_manies",
                AssociationKind::EmbedsMany,
            ))
            .embedded(true),
    ];

    let mut catalog = ModelCatalog::new();
    for schema in schemas {
        catalog.insert(schema).expect("sample schema has a name");
    }
    catalog
}

/// Discovery reporting the sample models, a duplicate and a reserved-namespace entry
pub fn sample_discovery() -> Arc<CountingDiscovery> {
    let mut names: Vec<String> = SAMPLE_MODELS.iter().map(|s| s.to_string()).collect();
    names.push("Team".to_string());
    names.push("Concerns::Taggable".to_string());
    Arc::new(CountingDiscovery::new(names))
}

/// Fresh admin context over the sample application
pub fn sample_admin() -> AdminContext {
    AdminContext::new(sample_discovery(), Arc::new(sample_catalog()))
}

/// Fresh admin context plus a handle on its discovery mock
pub fn sample_admin_with_discovery() -> (AdminContext, Arc<CountingDiscovery>) {
    let discovery = sample_discovery();
    let admin = AdminContext::new(discovery.clone(), Arc::new(sample_catalog()));
    (admin, discovery)
}

pub fn user_bindings(id: &str, roles: &[&str]) -> Bindings {
    let mut user = CurrentUser::new(id);
    for role in roles {
        user = user.with_role(*role);
    }
    Bindings::new().with_current_user(user)
}

pub fn keys(models: &[admiral_registry::BoundModelConfig]) -> Vec<String> {
    models.iter().map(|m| m.key().to_string()).collect()
}
