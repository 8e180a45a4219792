//! Field type plugin registry
//!
//! Maps a type tag (`string`, `belongs_to`, ...) to the behavior the admin UI
//! gives fields of that type. Hosts add their own tags with
//! [`FieldTypeRegistry::register`].

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Capabilities of one field type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBehavior {
    /// Form input used to edit the value
    pub input: String,

    /// Included in full-text search by default
    pub searchable: bool,

    /// List column can be sorted
    pub sortable: bool,

    /// Value refers to other records
    pub association: bool,

    /// Holds a collection of values
    pub multiple: bool,
}

impl FieldBehavior {
    /// Plain scalar attribute edited through `input`
    pub fn attribute(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            searchable: false,
            sortable: true,
            association: false,
            multiple: false,
        }
    }

    /// Association to other records
    pub fn association(multiple: bool) -> Self {
        Self {
            input: if multiple {
                "filtering_multiselect"
            } else {
                "filtering_select"
            }
            .to_string(),
            searchable: false,
            sortable: !multiple,
            association: true,
            multiple,
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Registered field types by tag
#[derive(Debug, Clone)]
pub struct FieldTypeRegistry {
    types: HashMap<String, FieldBehavior>,
}

impl Default for FieldTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FieldTypeRegistry {
    /// Registry with no types at all
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Registry holding the built-in types
    pub fn with_builtins() -> Self {
        let builtins = [
            ("string", FieldBehavior::attribute("text_field").searchable()),
            ("text", FieldBehavior::attribute("text_area").searchable()),
            ("integer", FieldBehavior::attribute("number_field")),
            ("decimal", FieldBehavior::attribute("number_field")),
            ("float", FieldBehavior::attribute("number_field")),
            ("boolean", FieldBehavior::attribute("check_box")),
            ("date", FieldBehavior::attribute("date_field")),
            ("datetime", FieldBehavior::attribute("datetime_field")),
            ("time", FieldBehavior::attribute("time_field")),
            ("enum", FieldBehavior::attribute("select")),
            ("serialized", FieldBehavior::attribute("text_area").unsortable()),
            ("belongs_to", FieldBehavior::association(false)),
            ("has_one", FieldBehavior::association(false)),
            ("has_many", FieldBehavior::association(true)),
            ("has_and_belongs_to_many", FieldBehavior::association(true)),
        ];

        Self {
            types: builtins
                .into_iter()
                .map(|(tag, behavior)| (tag.to_string(), behavior))
                .collect(),
        }
    }

    /// Register or replace a type
    pub fn register(&mut self, tag: impl Into<String>, behavior: FieldBehavior) {
        let tag = tag.into();
        debug!("Registered field type '{}'", tag);
        self.types.insert(tag, behavior);
    }

    pub fn get(&self, tag: &str) -> Option<&FieldBehavior> {
        self.types.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.types.contains_key(tag)
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.types.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}
