//! Value types used by the global settings

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Default search operator applied to list filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchOperator {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "starts_with")]
    StartsWith,
    #[serde(rename = "ends_with")]
    EndsWith,
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "=")]
    Equals,
}

impl SearchOperator {
    /// Every accepted spelling
    pub const ALL: [&'static str; 6] = ["default", "like", "starts_with", "ends_with", "is", "="];

    /// Operator as written in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOperator::Default => "default",
            SearchOperator::Like => "like",
            SearchOperator::StartsWith => "starts_with",
            SearchOperator::EndsWith => "ends_with",
            SearchOperator::Is => "is",
            SearchOperator::Equals => "=",
        }
    }
}

impl FromStr for SearchOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(SearchOperator::Default),
            "like" => Ok(SearchOperator::Like),
            "starts_with" => Ok(SearchOperator::StartsWith),
            "ends_with" => Ok(SearchOperator::EndsWith),
            "is" => Ok(SearchOperator::Is),
            "=" => Ok(SearchOperator::Equals),
            other => Err(Error::unsupported_search_operator(other)),
        }
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields hidden by default, per section family
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefaultHiddenFields {
    /// Hidden everywhere
    #[serde(default)]
    pub base: Vec<String>,

    /// Hidden in edit-family sections (edit, create, update, nested, modal)
    #[serde(default)]
    pub edit: Vec<String>,

    /// Hidden in the show section
    #[serde(default)]
    pub show: Vec<String>,
}

impl DefaultHiddenFields {
    /// Same list for edit and show, nothing for base
    pub fn for_views<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        Self {
            base: Vec::new(),
            edit: fields.clone(),
            show: fields,
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for DefaultHiddenFields {
    fn from(fields: Vec<S>) -> Self {
        Self::for_views(fields)
    }
}

/// What the host does on an invalid CSRF token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForgeryStrategy {
    #[default]
    Exception,
    NullSession,
    ResetSession,
}

/// Settings forwarded to the host's forgery protection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForgeryProtection {
    pub with: ForgeryStrategy,
    #[serde(default)]
    pub prepend: bool,
}

/// Horizontal scrolling of the list table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidescroll {
    /// Columns kept frozen on the left while scrolling
    #[serde(default)]
    pub num_frozen_columns: Option<u32>,
}

type AppNameFn = dyn Fn() -> [String; 2] + Send + Sync;

/// Application title: a static pair or computed on demand
#[derive(Clone)]
pub enum MainAppName {
    Static([String; 2]),
    Dynamic(Arc<AppNameFn>),
}

impl MainAppName {
    /// Computed title
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn() -> [String; 2] + Send + Sync + 'static,
    {
        MainAppName::Dynamic(Arc::new(f))
    }

    /// Default title derived from the host application's engine name
    ///
    /// `dummy_app` -> `["Dummy App", "Admin"]`
    pub fn from_engine_name(engine_name: &str) -> Self {
        let engine_name = engine_name.to_string();
        Self::dynamic(move || {
            let title = crate::utils::titleize(&engine_name);
            let title = title
                .strip_suffix(" Application")
                .map(str::to_string)
                .unwrap_or(title);
            [title, "Admin".to_string()]
        })
    }

    /// Resolve the title pair
    pub fn resolve(&self) -> [String; 2] {
        match self {
            MainAppName::Static(pair) => pair.clone(),
            MainAppName::Dynamic(f) => f(),
        }
    }
}

impl fmt::Debug for MainAppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainAppName::Static(pair) => f.debug_tuple("Static").field(pair).finish(),
            MainAppName::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
