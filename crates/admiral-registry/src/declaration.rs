//! Static configuration data recorded by replaying configuration blocks
//!
//! A [`ModelDeclaration`] is rebuilt from scratch on every replay, so replaying
//! the same blocks twice yields the same declaration.

use crate::rule::Rule;
use crate::section::Section;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Options declared for one field
#[derive(Debug, Clone, Default)]
pub struct FieldDeclaration {
    /// Listed explicitly, as opposed to only configured
    pub included: bool,
    pub field_type: Option<String>,
    pub label: Option<Rule<String>>,
    pub help: Option<String>,
    pub visible: Option<Rule<bool>>,
    pub read_only: Option<bool>,
    pub required: Option<bool>,
    pub searchable: Option<bool>,
    pub sortable: Option<bool>,
}

impl FieldDeclaration {
    /// Overlay `other` on top of `self`; options `other` sets win
    pub fn merge(&mut self, other: &FieldDeclaration) {
        self.included |= other.included;
        if other.field_type.is_some() {
            self.field_type.clone_from(&other.field_type);
        }
        if other.label.is_some() {
            self.label.clone_from(&other.label);
        }
        if other.help.is_some() {
            self.help.clone_from(&other.help);
        }
        if other.visible.is_some() {
            self.visible.clone_from(&other.visible);
        }
        self.read_only = other.read_only.or(self.read_only);
        self.required = other.required.or(self.required);
        self.searchable = other.searchable.or(self.searchable);
        self.sortable = other.sortable.or(self.sortable);
    }
}

/// Field declarations of one section, keyed by field name in declaration order
#[derive(Debug, Clone, Default)]
pub struct SectionDeclaration {
    pub fields: IndexMap<String, FieldDeclaration>,
    pub excluded: Vec<String>,
}

/// Model-level options and per-section field declarations
#[derive(Debug, Clone, Default)]
pub struct ModelDeclaration {
    pub label: Option<Rule<String>>,
    pub label_plural: Option<Rule<String>>,
    pub weight: Option<Rule<i32>>,
    pub visible: Option<Rule<bool>>,
    pub navigation_label: Option<String>,
    pub object_label_method: Option<String>,
    pub items_per_page: Option<u32>,
    pub associated_collection_limit: Option<u32>,
    pub sections: HashMap<Section, SectionDeclaration>,
}

impl ModelDeclaration {
    /// Declarations of `section` only, without inherited ones
    pub fn section(&self, section: Section) -> Option<&SectionDeclaration> {
        self.sections.get(&section)
    }

    pub(crate) fn section_mut(&mut self, section: Section) -> &mut SectionDeclaration {
        self.sections.entry(section).or_default()
    }

    /// Declarations along `section`'s inheritance chain, merged from `base` down
    ///
    /// Returns the merged fields in first-declaration order and the union of
    /// excluded names.
    pub fn merged_fields(&self, section: Section) -> (IndexMap<String, FieldDeclaration>, Vec<String>) {
        let mut fields: IndexMap<String, FieldDeclaration> = IndexMap::new();
        let mut excluded: Vec<String> = Vec::new();

        for link in section.chain() {
            let Some(declared) = self.sections.get(&link) else {
                continue;
            };
            for (name, declaration) in &declared.fields {
                fields.entry(name.clone()).or_default().merge(declaration);
            }
            for name in &declared.excluded {
                if !excluded.contains(name) {
                    excluded.push(name.clone());
                }
            }
        }

        (fields, excluded)
    }
}
