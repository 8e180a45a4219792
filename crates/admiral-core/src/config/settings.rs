//! Global settings and their hard-coded defaults

use crate::error::Result;
use crate::types::{
    CanonicalKey, DefaultHiddenFields, ForgeryProtection, MainAppName, SearchOperator, Sidescroll,
};
use indexmap::IndexMap;

/// Engine name used when the host does not provide one
pub const DEFAULT_ENGINE_NAME: &str = "admiral_app";

const DEFAULT_PARENT_CONTROLLER: &str = "::ActionController::Base";

const TIMESTAMP_AND_ID_FIELDS: &[&str] = &[
    "id",
    "_id",
    "created_at",
    "created_on",
    "deleted_at",
    "updated_at",
    "updated_on",
    "deleted_on",
];

/// Process-wide admin settings
///
/// Every field is restored to its hard-coded default by [`Settings::reset`].
/// The search operator is validated on assignment and therefore only reachable
/// through [`Settings::default_search_operator`] and
/// [`Settings::set_default_search_operator`].
#[derive(Debug, Clone)]
pub struct Settings {
    /// Application title
    pub main_app_name: MainAppName,

    /// Allowlist of model names; empty means no restriction
    pub included_models: Vec<String>,

    /// Blocklist of model names, always subtracted
    pub excluded_models: Vec<String>,

    /// Fields hidden by default, per section family
    pub default_hidden_fields: DefaultHiddenFields,

    /// Items per page when a model does not configure its own
    pub default_items_per_page: u32,

    /// Association limit when a model does not configure its own
    pub default_associated_collection_limit: u32,

    /// Candidate attribute names used to label records
    pub label_methods: Vec<String>,

    /// Hide blank fields in the show view
    pub compact_show_view: bool,

    /// Let browsers run native form validations
    pub browser_validations: bool,

    /// Max width of list columns before a new set is created
    pub total_columns_width: u32,

    /// Horizontal-scrolling list table; overrides `total_columns_width`
    pub sidescroll: Option<Sidescroll>,

    /// Controller the admin controllers inherit from
    pub parent_controller: String,

    /// Settings forwarded to the host's forgery protection
    pub forgery_protection_settings: ForgeryProtection,

    /// Show Gravatar in the navigation bar
    pub show_gravatar: bool,

    /// Static links shown below the main navigation, label -> url
    pub navigation_static_links: IndexMap<String, String>,

    /// Heading above the static links
    pub navigation_static_label: Option<String>,

    default_search_operator: SearchOperator,
    engine_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_application(DEFAULT_ENGINE_NAME)
    }
}

impl Settings {
    /// Defaults for a host application with the given engine name
    pub fn for_application(engine_name: impl Into<String>) -> Self {
        let engine_name = engine_name.into();
        let timestamps: Vec<String> = TIMESTAMP_AND_ID_FIELDS.iter().map(|s| s.to_string()).collect();

        Self {
            main_app_name: MainAppName::from_engine_name(&engine_name),
            included_models: Vec::new(),
            excluded_models: Vec::new(),
            default_hidden_fields: DefaultHiddenFields {
                base: vec!["_type".to_string()],
                edit: timestamps.clone(),
                show: timestamps,
            },
            default_items_per_page: 20,
            default_associated_collection_limit: 100,
            label_methods: vec!["name".to_string(), "title".to_string()],
            compact_show_view: true,
            browser_validations: true,
            total_columns_width: 697,
            sidescroll: None,
            parent_controller: DEFAULT_PARENT_CONTROLLER.to_string(),
            forgery_protection_settings: ForgeryProtection::default(),
            show_gravatar: true,
            navigation_static_links: IndexMap::new(),
            navigation_static_label: None,
            default_search_operator: SearchOperator::Default,
            engine_name,
        }
    }

    /// Restore every setting to its default
    pub fn reset(&mut self) {
        *self = Self::for_application(std::mem::take(&mut self.engine_name));
    }

    /// Host application's engine name
    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    /// Current default search operator
    pub fn default_search_operator(&self) -> SearchOperator {
        self.default_search_operator
    }

    /// Set the default search operator
    ///
    /// Values outside the fixed set are rejected and the previous value kept.
    pub fn set_default_search_operator(&mut self, operator: &str) -> Result<()> {
        self.default_search_operator = operator.parse()?;
        Ok(())
    }

    /// Replace the hidden-field defaults
    ///
    /// A plain list applies to edit and show and clears base.
    pub fn set_default_hidden_fields(&mut self, fields: impl Into<DefaultHiddenFields>) {
        self.default_hidden_fields = fields.into();
    }

    /// Set the allowlist
    pub fn set_included_models<I, S>(&mut self, models: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_models = models.into_iter().map(Into::into).collect();
    }

    /// Set the blocklist
    pub fn set_excluded_models<I, S>(&mut self, models: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_models = models.into_iter().map(Into::into).collect();
    }

    /// Absent from a non-empty allowlist, or present in the blocklist
    pub fn is_excluded(&self, key: &CanonicalKey) -> bool {
        let name = key.as_str();
        let not_included =
            !self.included_models.is_empty() && !self.included_models.iter().any(|m| m == name);
        not_included || self.excluded_models.iter().any(|m| m == name)
    }

    /// Resolved application title
    pub fn main_app_name(&self) -> [String; 2] {
        self.main_app_name.resolve()
    }
}
