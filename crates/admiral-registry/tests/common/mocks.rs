//! Mock collaborators

use admiral_core::types::{
    AbstractModel, AdminAction, AuthorizationAdapter, ConfigurationAdapter, ModelDiscovery,
};
use admiral_core::{BoxError, RequestContext, Result, Settings};
use admiral_extensions::{AdapterClass, AuthorizationAdapterClass, ConfigurationAdapterClass};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Discovery over a fixed name list that counts scans and resets
#[derive(Debug, Default)]
pub struct CountingDiscovery {
    names: Vec<String>,
    pub scans: AtomicUsize,
    pub resets: AtomicUsize,
}

impl CountingDiscovery {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            ..Default::default()
        }
    }

    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl ModelDiscovery for CountingDiscovery {
    fn discover_model_names(&self) -> Result<Vec<String>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        Ok(self.names.clone())
    }

    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Refuses `index` on the models passed as string arguments
#[derive(Debug)]
pub struct DenyModels {
    denied: Vec<String>,
}

impl AuthorizationAdapter for DenyModels {
    fn authorized(
        &self,
        action: AdminAction,
        model: Option<&AbstractModel>,
    ) -> std::result::Result<bool, BoxError> {
        let denied = model.is_some_and(|m| self.denied.iter().any(|d| d == m.name()));
        Ok(!(action == AdminAction::Index && denied))
    }
}

pub fn deny_models() -> AuthorizationAdapterClass {
    AdapterClass::new(|_: &RequestContext, args: &[Value]| {
        let denied = args
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        Ok(Arc::new(DenyModels { denied }) as Arc<dyn AuthorizationAdapter>)
    })
}

/// Authorization adapter whose checks always fail
#[derive(Debug)]
pub struct BrokenAuthorization;

impl AuthorizationAdapter for BrokenAuthorization {
    fn authorized(
        &self,
        _action: AdminAction,
        _model: Option<&AbstractModel>,
    ) -> std::result::Result<bool, BoxError> {
        Err("policy backend unavailable".into())
    }
}

/// Accepts a single `items_per_page` option
#[derive(Debug, Default)]
pub struct PageSizeConfiguration {
    pub items_per_page: Option<u32>,
}

impl ConfigurationAdapter for PageSizeConfiguration {
    fn set(&mut self, key: &str, value: Value) -> std::result::Result<(), BoxError> {
        match (key, value.as_u64()) {
            ("items_per_page", Some(n)) => {
                self.items_per_page = Some(u32::try_from(n)?);
                Ok(())
            }
            _ => Err(format!("unsupported option '{}'", key).into()),
        }
    }

    fn apply(&self, settings: &mut Settings) -> std::result::Result<(), BoxError> {
        if let Some(n) = self.items_per_page {
            settings.default_items_per_page = n;
        }
        Ok(())
    }
}

pub fn page_size_configuration() -> ConfigurationAdapterClass {
    ConfigurationAdapterClass::new(|| Box::new(PageSizeConfiguration::default()))
}
