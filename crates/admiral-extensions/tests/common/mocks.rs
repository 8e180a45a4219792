//! Mock adapters

use admiral_core::types::{
    AbstractModel, AdminAction, AuditEvent, AuditingAdapter, AuthorizationAdapter,
    ConfigurationAdapter,
};
use admiral_core::{BoxError, RequestContext, Settings};
use admiral_extensions::{
    AdapterClass, AuditingAdapterClass, AuthorizationAdapterClass, ConfigurationAdapterClass,
    ExtensionModule,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Allows an action when the session user holds the role passed as first argument
#[derive(Debug)]
pub struct RoleAuthorization {
    pub allowed: bool,
    pub args: Vec<Value>,
}

impl AuthorizationAdapter for RoleAuthorization {
    fn authorized(
        &self,
        _action: AdminAction,
        _model: Option<&AbstractModel>,
    ) -> Result<bool, BoxError> {
        Ok(self.allowed)
    }
}

pub fn role_authorization() -> AuthorizationAdapterClass {
    AdapterClass::new(|root: &RequestContext, args: &[Value]| {
        let role = args.first().and_then(Value::as_str).unwrap_or("admin");
        let allowed = root.session_user().is_some_and(|u| u.has_role(role));
        Ok(Arc::new(RoleAuthorization {
            allowed,
            args: args.to_vec(),
        }) as Arc<dyn AuthorizationAdapter>)
    })
}

/// Records events in memory
#[derive(Debug, Default)]
pub struct MemoryAuditing {
    pub events: Mutex<Vec<AuditEvent>>,
}

impl AuditingAdapter for MemoryAuditing {
    fn record(&self, event: &AuditEvent) -> Result<(), BoxError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

pub fn memory_auditing() -> AuditingAdapterClass {
    AdapterClass::new(|_: &RequestContext, _: &[Value]| {
        Ok(Arc::new(MemoryAuditing::default()) as Arc<dyn AuditingAdapter>)
    })
}

/// Accepts `models` and `items_per_page` options
#[derive(Debug, Default)]
pub struct KeyValueConfiguration {
    pub models: Vec<String>,
    pub items_per_page: Option<u32>,
}

impl ConfigurationAdapter for KeyValueConfiguration {
    fn set(&mut self, key: &str, value: Value) -> Result<(), BoxError> {
        match key {
            "models" => {
                self.models = serde_json::from_value(value)?;
                Ok(())
            }
            "items_per_page" => {
                let n = value.as_u64().ok_or("items_per_page must be a number")?;
                self.items_per_page = Some(u32::try_from(n)?);
                Ok(())
            }
            other => Err(format!("unknown option '{}'", other).into()),
        }
    }

    fn apply(&self, settings: &mut Settings) -> Result<(), BoxError> {
        if !self.models.is_empty() {
            settings.set_included_models(self.models.clone());
        }
        if let Some(n) = self.items_per_page {
            settings.default_items_per_page = n;
        }
        Ok(())
    }
}

pub fn key_value_configuration() -> ConfigurationAdapterClass {
    ConfigurationAdapterClass::new(|| Box::new(KeyValueConfiguration::default()))
}

/// Module providing every capability
pub fn full_module() -> ExtensionModule {
    ExtensionModule::new()
        .with_authorization(role_authorization())
        .with_auditing(memory_auditing())
        .with_configuration(key_value_configuration())
}
