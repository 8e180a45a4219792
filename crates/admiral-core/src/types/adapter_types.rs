//! Authorization, auditing and configuration adapter contracts
//!
//! Only the contracts live here. Concrete adapters are supplied by extensions
//! and registered through the extension registry.

use crate::config::Settings;
use crate::error::{BoxError, Error, Result};
use crate::types::{AbstractModel, CanonicalKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Admin actions an authorization adapter is asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    Dashboard,
    Index,
    Show,
    New,
    Edit,
    Delete,
    Export,
    BulkDelete,
    HistoryIndex,
    HistoryShow,
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdminAction::Dashboard => "dashboard",
            AdminAction::Index => "index",
            AdminAction::Show => "show",
            AdminAction::New => "new",
            AdminAction::Edit => "edit",
            AdminAction::Delete => "delete",
            AdminAction::Export => "export",
            AdminAction::BulkDelete => "bulk_delete",
            AdminAction::HistoryIndex => "history_index",
            AdminAction::HistoryShow => "history_show",
        };
        f.write_str(name)
    }
}

/// Authorization capability
pub trait AuthorizationAdapter: Send + Sync + fmt::Debug {
    /// Whether `action` is allowed, optionally scoped to a model
    fn authorized(
        &self,
        action: AdminAction,
        model: Option<&AbstractModel>,
    ) -> std::result::Result<bool, BoxError>;

    /// Like [`authorized`](Self::authorized) but turns a refusal into an error
    fn authorize(&self, action: AdminAction, model: Option<&AbstractModel>) -> Result<()> {
        let model_name = model.map(|m| m.name()).unwrap_or("dashboard");
        match self.authorized(action, model) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::access_denied(action.to_string(), model_name)),
            Err(source) => Err(Error::predicate(model_name, "authorization", source)),
        }
    }
}

/// Record lifecycle events observed by an auditing adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

/// One audited change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub model: CanonicalKey,
    pub record_id: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub changes: serde_json::Map<String, serde_json::Value>,
    pub at: DateTime<Utc>,
}

impl AuditEvent {
    /// Create an event stamped with the current time
    pub fn new(action: AuditAction, model: CanonicalKey, record_id: impl Into<String>) -> Self {
        Self {
            action,
            model,
            record_id: record_id.into(),
            user: None,
            changes: serde_json::Map::new(),
            at: Utc::now(),
        }
    }

    /// Attribute the event to a user
    pub fn by(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// Auditing capability
pub trait AuditingAdapter: Send + Sync + fmt::Debug {
    /// Record one lifecycle event
    fn record(&self, event: &AuditEvent) -> std::result::Result<(), BoxError>;

    /// Events previously recorded for a model, newest first
    fn history_for_model(
        &self,
        model: &CanonicalKey,
    ) -> std::result::Result<Vec<AuditEvent>, BoxError> {
        let _ = model;
        Ok(Vec::new())
    }
}

/// Configuration-loading capability
pub trait ConfigurationAdapter: Send + Sync + fmt::Debug {
    /// Set one adapter-specific option
    fn set(&mut self, key: &str, value: serde_json::Value) -> std::result::Result<(), BoxError>;

    /// Apply the adapter's configuration to the global settings
    fn apply(&self, settings: &mut Settings) -> std::result::Result<(), BoxError> {
        let _ = settings;
        Ok(())
    }
}
