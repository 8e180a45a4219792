//! Canonical model keys and model reference resolution

use crate::error::{Error, Result};
use crate::types::{AbstractModel, ModelSchema};
use crate::utils::short_type_name;
use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

/// Normalized identifier naming one model, e.g. `Team` or `Blog::Post`
///
/// Cloning is cheap; the name is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(Arc<str>);

impl CanonicalKey {
    /// Build a key from a name that is already canonical
    ///
    /// Returns `None` for an empty name.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(Self(Arc::from(name)))
        }
    }

    /// The model name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CanonicalKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Any reference to a data model
///
/// A reference is either an abstract-model wrapper, a model class (its schema),
/// a name given verbatim, or the runtime type of an arbitrary record.
#[derive(Debug, Clone)]
pub enum ModelRef<'a> {
    /// Abstract-model wrapper; its underlying class name is used
    Abstract(&'a AbstractModel),
    /// Model class description; its name is used
    Class(&'a ModelSchema),
    /// Model name used verbatim
    Name(Cow<'a, str>),
    /// Runtime type name of a record
    Instance(&'static str),
}

impl ModelRef<'static> {
    /// Reference the model of an arbitrary record through its runtime type
    pub fn of<T: ?Sized>(_record: &T) -> Self {
        ModelRef::Instance(short_type_name::<T>())
    }
}

impl<'a> ModelRef<'a> {
    /// The raw name this reference points at, before validation
    pub fn name(&self) -> &str {
        match self {
            ModelRef::Abstract(model) => model.name(),
            ModelRef::Class(schema) => &schema.name,
            ModelRef::Name(name) => name,
            ModelRef::Instance(type_name) => type_name,
        }
    }

    /// Normalize this reference into a canonical key
    pub fn resolve(&self) -> Result<CanonicalKey> {
        CanonicalKey::new(self.name())
            .ok_or_else(|| Error::unresolvable_model(format!("{:?}", self)))
    }
}

/// Normalize any model reference into its canonical key
pub fn resolve<'a>(entity: impl Into<ModelRef<'a>>) -> Result<CanonicalKey> {
    entity.into().resolve()
}

impl<'a> From<&'a str> for ModelRef<'a> {
    fn from(name: &'a str) -> Self {
        ModelRef::Name(Cow::Borrowed(name))
    }
}

impl<'a> From<&'a String> for ModelRef<'a> {
    fn from(name: &'a String) -> Self {
        ModelRef::Name(Cow::Borrowed(name.as_str()))
    }
}

impl From<String> for ModelRef<'static> {
    fn from(name: String) -> Self {
        ModelRef::Name(Cow::Owned(name))
    }
}

impl<'a> From<&'a CanonicalKey> for ModelRef<'a> {
    fn from(key: &'a CanonicalKey) -> Self {
        ModelRef::Name(Cow::Borrowed(key.as_str()))
    }
}

impl<'a> From<&'a AbstractModel> for ModelRef<'a> {
    fn from(model: &'a AbstractModel) -> Self {
        ModelRef::Abstract(model)
    }
}

impl<'a> From<&'a ModelSchema> for ModelRef<'a> {
    fn from(schema: &'a ModelSchema) -> Self {
        ModelRef::Class(schema)
    }
}

impl<'a> From<&'a Arc<ModelSchema>> for ModelRef<'a> {
    fn from(schema: &'a Arc<ModelSchema>) -> Self {
        ModelRef::Class(schema)
    }
}
