//! Static-or-computed configuration values

use admiral_core::{BoxError, Bindings};
use std::fmt;
use std::sync::Arc;

type RuleFn<T> = dyn Fn(&Bindings) -> Result<T, BoxError> + Send + Sync;

/// A configuration value fixed at declaration time or computed per request
pub enum Rule<T> {
    Value(T),
    Computed(Arc<RuleFn<T>>),
}

impl<T: Clone> Rule<T> {
    /// Rule computed from the request bindings
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Bindings) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Rule::Computed(Arc::new(f))
    }

    /// Resolve against `bindings`
    pub fn evaluate(&self, bindings: &Bindings) -> Result<T, BoxError> {
        match self {
            Rule::Value(value) => Ok(value.clone()),
            Rule::Computed(f) => f(bindings),
        }
    }

    /// The fixed value, if the rule is not computed
    pub fn value(&self) -> Option<&T> {
        match self {
            Rule::Value(value) => Some(value),
            Rule::Computed(_) => None,
        }
    }
}

impl<T: Clone> Clone for Rule<T> {
    fn clone(&self) -> Self {
        match self {
            Rule::Value(value) => Rule::Value(value.clone()),
            Rule::Computed(f) => Rule::Computed(f.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Rule::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T> From<T> for Rule<T> {
    fn from(value: T) -> Self {
        Rule::Value(value)
    }
}
