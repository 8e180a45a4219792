//! Error types for admiral-core

use thiserror::Error;

/// Result type alias using admiral-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by user-supplied rules, hooks and adapters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error types for admiral
#[derive(Error, Debug)]
pub enum Error {
    /// A recognized option was given a value outside its fixed set
    #[error("{message}")]
    InvalidOption {
        option: String,
        value: String,
        message: String,
    },

    /// A model reference could not be normalized to a key
    #[error("Cannot resolve model reference: {reference}")]
    UnresolvableModel { reference: String },

    /// A visibility/weight/label rule or authorization check failed
    #[error("Failed to evaluate {attribute} for model {model}: {source}")]
    Predicate {
        model: String,
        attribute: String,
        #[source]
        source: BoxError,
    },

    /// A request hook failed
    #[error("{hook} hook failed: {source}")]
    Hook {
        hook: String,
        #[source]
        source: BoxError,
    },

    /// No adapter registered for the extension name and capability
    #[error("No {capability} adapter registered for extension '{name}'")]
    UnknownExtension { name: String, capability: String },

    /// The extension module does not provide the requested capability
    #[error("Extension '{name}' provides no {capability} adapter")]
    MissingAdapter { name: String, capability: String },

    /// A field was declared with an unregistered type tag
    #[error("Unknown field type '{field_type}' for field {model}.{field}")]
    UnknownFieldType {
        model: String,
        field: String,
        field_type: String,
    },

    /// Authorization adapter refused an action
    #[error("Access denied: {action} on {model}")]
    AccessDenied { action: String, model: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Directory traversal error
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid option error with a preformatted message
    pub fn invalid_option(
        option: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            option: option.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported search operator error
    pub fn unsupported_search_operator(value: impl Into<String>) -> Self {
        let value = value.into();
        let message = format!("Search operator '{}' not supported", value);
        Self::invalid_option("default_search_operator", value, message)
    }

    /// Create an unresolvable model error
    pub fn unresolvable_model(reference: impl Into<String>) -> Self {
        Self::UnresolvableModel {
            reference: reference.into(),
        }
    }

    /// Wrap an error raised by a model or field rule
    pub fn predicate(model: impl Into<String>, attribute: impl Into<String>, source: BoxError) -> Self {
        Self::Predicate {
            model: model.into(),
            attribute: attribute.into(),
            source,
        }
    }

    /// Wrap an error raised by a request hook
    pub fn hook(hook: impl Into<String>, source: BoxError) -> Self {
        Self::Hook {
            hook: hook.into(),
            source,
        }
    }

    /// Create an unknown extension error
    pub fn unknown_extension(name: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::UnknownExtension {
            name: name.into(),
            capability: capability.into(),
        }
    }

    /// Create a missing adapter error
    pub fn missing_adapter(name: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::MissingAdapter {
            name: name.into(),
            capability: capability.into(),
        }
    }

    /// Create an unknown field type error
    pub fn unknown_field_type(
        model: impl Into<String>,
        field: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self::UnknownFieldType {
            model: model.into(),
            field: field.into(),
            field_type: field_type.into(),
        }
    }

    /// Create an access denied error
    pub fn access_denied(action: impl Into<String>, model: impl Into<String>) -> Self {
        Self::AccessDenied {
            action: action.into(),
            model: model.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}
