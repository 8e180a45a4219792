//! Model schema types and the collaborator contracts that produce them

use crate::error::Result;
use crate::types::CanonicalKey;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Association kinds a property may represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    BelongsTo,
    HasOne,
    HasMany,
    HasAndBelongsToMany,
    EmbedsOne,
    EmbedsMany,
}

impl AssociationKind {
    /// Field type tag used for this association
    pub fn field_type(&self) -> &'static str {
        match self {
            AssociationKind::BelongsTo => "belongs_to",
            AssociationKind::HasOne | AssociationKind::EmbedsOne => "has_one",
            AssociationKind::HasMany | AssociationKind::EmbedsMany => "has_many",
            AssociationKind::HasAndBelongsToMany => "has_and_belongs_to_many",
        }
    }
}

/// One attribute or association reported by model introspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Attribute or association name
    pub name: String,

    /// Field type tag (e.g. "string", "integer", "belongs_to")
    #[serde(rename = "type", default = "default_property_type")]
    pub field_type: String,

    /// Whether the attribute accepts nulls
    #[serde(default = "default_true")]
    pub nullable: bool,

    /// Association kind, when the property is an association
    #[serde(default)]
    pub association: Option<AssociationKind>,
}

fn default_property_type() -> String {
    "string".to_string()
}

fn default_true() -> bool {
    true
}

impl Property {
    /// Create a plain attribute property
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            nullable: true,
            association: None,
        }
    }

    /// Create an association property
    pub fn association(name: impl Into<String>, kind: AssociationKind) -> Self {
        Self {
            name: name.into(),
            field_type: kind.field_type().to_string(),
            nullable: true,
            association: Some(kind),
        }
    }

    /// Mark the property as not nullable
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Description of one model class as reported by the host's introspection layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Fully-qualified model name (e.g. "Blog::Post")
    pub name: String,

    /// Attributes and associations in declaration order
    #[serde(default)]
    pub properties: Vec<Property>,

    /// Records only exist nested inside a parent record
    #[serde(default)]
    pub embedded: bool,

    /// Embedded type that embeds itself recursively
    #[serde(default)]
    pub cyclic: bool,
}

impl ModelSchema {
    /// Create a schema with no properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            embedded: false,
            cyclic: false,
        }
    }

    /// Append a property
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Mark the model as embedded
    pub fn embedded(mut self, cyclic: bool) -> Self {
        self.embedded = true;
        self.cyclic = cyclic;
        self
    }
}

/// Abstract-model wrapper over an introspected model class
#[derive(Debug, Clone)]
pub struct AbstractModel {
    schema: Arc<ModelSchema>,
}

impl AbstractModel {
    /// Wrap a model schema
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self { schema }
    }

    /// Underlying class name
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// Underlying class description
    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// Attributes and associations in introspection order
    pub fn properties(&self) -> &[Property] {
        &self.schema.properties
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.schema.properties.iter().find(|p| p.name == name)
    }

    /// Records only exist nested in a parent
    pub fn is_embedded(&self) -> bool {
        self.schema.embedded
    }

    /// Embedded type that embeds itself
    pub fn is_cyclic(&self) -> bool {
        self.schema.cyclic
    }

    /// Whether the model gets its own top-level admin entry
    ///
    /// Embedded models are reached through their parent; self-embedding types
    /// are the exception.
    pub fn is_top_level(&self) -> bool {
        !self.is_embedded() || self.is_cyclic()
    }
}

/// Namespace whose models are never offered for administration
pub const RESERVED_NAMESPACE: &str = "Concerns::";

/// Model discovery collaborator
///
/// Reports the fully-qualified names of every model in the host application.
pub trait ModelDiscovery: Send + Sync {
    /// Names of all discovered models, excluding the reserved `Concerns` namespace
    fn discover_model_names(&self) -> Result<Vec<String>>;

    /// Drop any memoized scan result
    fn reset(&self) {}
}

/// Model introspection collaborator
///
/// Produces the abstract-model wrapper for a key, or `None` when the key does
/// not name an introspectable model.
pub trait ModelIntrospection: Send + Sync {
    /// Describe the model named by `key`
    fn lookup(&self, key: &CanonicalKey) -> Option<AbstractModel>;
}
