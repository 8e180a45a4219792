//! Materialized field configuration
//!
//! Fields of a section come from two places: the model's introspected
//! properties and the declarations recorded for the section's inheritance
//! chain. Once any field is listed explicitly, only listed fields are shown;
//! otherwise every introspected property is.

use crate::declaration::{FieldDeclaration, ModelDeclaration};
use crate::field_type::{FieldBehavior, FieldTypeRegistry};
use crate::rule::Rule;
use crate::section::Section;
use admiral_core::types::{AbstractModel, Property};
use admiral_core::utils::humanize;
use admiral_core::{Bindings, CanonicalKey, Error, Result, Settings};
use tracing::{trace, warn};

/// Type tag for fields with neither a declared nor an introspected type
const FALLBACK_FIELD_TYPE: &str = "string";

/// One field of one section, with every option resolved
#[derive(Debug, Clone)]
pub struct FieldConfig {
    model: CanonicalKey,
    name: String,
    field_type: String,
    behavior: FieldBehavior,
    label: Rule<String>,
    help: Option<String>,
    visible: Rule<bool>,
    read_only: bool,
    required: bool,
    searchable: bool,
    sortable: bool,
    property: Option<Property>,
}

impl FieldConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn behavior(&self) -> &FieldBehavior {
        &self.behavior
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Introspected property backing this field, if any
    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    /// Visibility rule, before evaluation
    pub fn visible_rule(&self) -> &Rule<bool> {
        &self.visible
    }

    /// Whether the field is shown under `bindings`
    pub fn is_visible(&self, bindings: &Bindings) -> Result<bool> {
        self.visible.evaluate(bindings).map_err(|e| {
            Error::predicate(self.model.as_str(), format!("{}.visible", self.name), e)
        })
    }

    /// Field label under `bindings`
    pub fn label(&self, bindings: &Bindings) -> Result<String> {
        self.label
            .evaluate(bindings)
            .map_err(|e| Error::predicate(self.model.as_str(), format!("{}.label", self.name), e))
    }
}

/// Build the field list of `section`
pub(crate) fn materialize_fields(
    key: &CanonicalKey,
    abstract_model: Option<&AbstractModel>,
    declaration: &ModelDeclaration,
    section: Section,
    settings: &Settings,
    field_types: &FieldTypeRegistry,
) -> Result<Vec<FieldConfig>> {
    let (declared, excluded) = declaration.merged_fields(section);
    let properties = abstract_model.map(|m| m.properties()).unwrap_or_default();

    let names: Vec<&str> = if declared.values().any(|d| d.included) {
        declared
            .iter()
            .filter(|(_, d)| d.included)
            .map(|(name, _)| name.as_str())
            .collect()
    } else {
        properties.iter().map(|p| p.name.as_str()).collect()
    };

    let hidden = hidden_by_default(settings, section);
    let mut fields = Vec::with_capacity(names.len());

    for name in names {
        if excluded.iter().any(|e| e == name) {
            continue;
        }

        let property = properties.iter().find(|p| p.name == name);
        let field = build_field(
            key,
            name,
            property,
            declared.get(name),
            hidden.contains(&name),
            field_types,
        )?;
        fields.push(field);
    }

    trace!(model = %key, section = %section, count = fields.len(), "Materialized fields");
    Ok(fields)
}

fn hidden_by_default(settings: &Settings, section: Section) -> Vec<&str> {
    let hidden = &settings.default_hidden_fields;
    let mut names: Vec<&str> = hidden.base.iter().map(String::as_str).collect();
    if section.is_edit_family() {
        names.extend(hidden.edit.iter().map(String::as_str));
    } else if section == Section::Show {
        names.extend(hidden.show.iter().map(String::as_str));
    }
    names
}

fn build_field(
    key: &CanonicalKey,
    name: &str,
    property: Option<&Property>,
    declaration: Option<&FieldDeclaration>,
    hidden_by_default: bool,
    field_types: &FieldTypeRegistry,
) -> Result<FieldConfig> {
    let declared_type = declaration.and_then(|d| d.field_type.as_deref());

    let (field_type, behavior) = match declared_type {
        Some(tag) => {
            let behavior = field_types
                .get(tag)
                .ok_or_else(|| Error::unknown_field_type(key.as_str(), name, tag))?;
            (tag.to_string(), behavior.clone())
        }
        None => {
            let tag = property.map_or(FALLBACK_FIELD_TYPE, |p| p.field_type.as_str());
            match field_types.get(tag) {
                Some(behavior) => (tag.to_string(), behavior.clone()),
                None => {
                    warn!(
                        model = %key,
                        "Field {} has unregistered type '{}', treating it as {}",
                        name, tag, FALLBACK_FIELD_TYPE
                    );
                    let behavior = field_types
                        .get(FALLBACK_FIELD_TYPE)
                        .cloned()
                        .unwrap_or_else(|| FieldBehavior::attribute("text_field"));
                    (FALLBACK_FIELD_TYPE.to_string(), behavior)
                }
            }
        }
    };

    let default = FieldDeclaration::default();
    let declaration = declaration.unwrap_or(&default);

    let visible = match &declaration.visible {
        Some(rule) => rule.clone(),
        None => Rule::Value(!hidden_by_default),
    };

    Ok(FieldConfig {
        model: key.clone(),
        name: name.to_string(),
        label: declaration
            .label
            .clone()
            .unwrap_or_else(|| Rule::Value(humanize(name))),
        help: declaration.help.clone(),
        visible,
        read_only: declaration.read_only.unwrap_or(false),
        required: declaration
            .required
            .unwrap_or_else(|| property.is_some_and(|p| !p.nullable)),
        searchable: declaration.searchable.unwrap_or(behavior.searchable),
        sortable: declaration.sortable.unwrap_or(behavior.sortable),
        property: property.cloned(),
        field_type,
        behavior,
    })
}
