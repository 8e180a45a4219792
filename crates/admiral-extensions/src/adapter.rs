//! Adapter classes: constructor-equivalent factories plus optional setup
//!
//! An adapter class is what an extension registers. Instantiating it takes the
//! request context (the configuration root) and the extra arguments passed to
//! `authorize_with`/`audit_with`.

use admiral_core::types::{AuditingAdapter, AuthorizationAdapter, ConfigurationAdapter};
use admiral_core::{BoxError, Error, RequestContext};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Factory<T> =
    dyn Fn(&RequestContext, &[Value]) -> Result<Arc<T>, BoxError> + Send + Sync + 'static;
type SetupFn = dyn Fn() -> Result<(), BoxError> + Send + Sync + 'static;

/// Factory and optional one-time setup for one adapter type
pub struct AdapterClass<T: ?Sized> {
    factory: Arc<Factory<T>>,
    setup: Option<Arc<SetupFn>>,
}

impl<T: ?Sized> Clone for AdapterClass<T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            setup: self.setup.clone(),
        }
    }
}

impl<T: ?Sized> AdapterClass<T> {
    /// Adapter class built by `factory`
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&RequestContext, &[Value]) -> Result<Arc<T>, BoxError> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            setup: None,
        }
    }

    /// Attach a class-level setup run once before the first instantiation hook
    pub fn with_setup<S>(mut self, setup: S) -> Self
    where
        S: Fn() -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.setup = Some(Arc::new(setup));
        self
    }

    /// Whether the class exposes a setup
    pub fn has_setup(&self) -> bool {
        self.setup.is_some()
    }

    /// Run the class-level setup, if any
    pub fn run_setup(&self) -> Result<(), BoxError> {
        match &self.setup {
            Some(setup) => setup(),
            None => Ok(()),
        }
    }

    /// Construct an adapter for `root` with forwarded arguments
    pub fn instantiate(&self, root: &RequestContext, args: &[Value]) -> Result<Arc<T>, BoxError> {
        (self.factory)(root, args)
    }
}

impl<T: ?Sized> fmt::Debug for AdapterClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterClass")
            .field("setup", &self.setup.is_some())
            .finish_non_exhaustive()
    }
}

pub type AuthorizationAdapterClass = AdapterClass<dyn AuthorizationAdapter>;
pub type AuditingAdapterClass = AdapterClass<dyn AuditingAdapter>;

type ConfigurationFactory = dyn Fn() -> Box<dyn ConfigurationAdapter> + Send + Sync + 'static;

/// Factory for configuration adapters; these take no constructor arguments
#[derive(Clone)]
pub struct ConfigurationAdapterClass {
    factory: Arc<ConfigurationFactory>,
}

impl ConfigurationAdapterClass {
    /// Configuration adapter class built by `factory`
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn ConfigurationAdapter> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Construct a fresh adapter
    pub fn instantiate(&self) -> Box<dyn ConfigurationAdapter> {
        (self.factory)()
    }

    /// Construct a fresh adapter and let `configure` set its options
    pub fn configure<F>(&self, configure: F) -> admiral_core::Result<Box<dyn ConfigurationAdapter>>
    where
        F: FnOnce(&mut dyn ConfigurationAdapter) -> Result<(), BoxError>,
    {
        let mut adapter = self.instantiate();
        configure(adapter.as_mut()).map_err(|e| Error::hook("configure_with", e))?;
        Ok(adapter)
    }
}

impl fmt::Debug for ConfigurationAdapterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationAdapterClass").finish_non_exhaustive()
    }
}

/// What an extension module provides, one optional class per capability
#[derive(Debug, Clone, Default)]
pub struct ExtensionModule {
    pub authorization: Option<AuthorizationAdapterClass>,
    pub auditing: Option<AuditingAdapterClass>,
    pub configuration: Option<ConfigurationAdapterClass>,
}

impl ExtensionModule {
    /// Module providing nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an authorization adapter class
    pub fn with_authorization(mut self, class: AuthorizationAdapterClass) -> Self {
        self.authorization = Some(class);
        self
    }

    /// Provide an auditing adapter class
    pub fn with_auditing(mut self, class: AuditingAdapterClass) -> Self {
        self.auditing = Some(class);
        self
    }

    /// Provide a configuration adapter class
    pub fn with_configuration(mut self, class: ConfigurationAdapterClass) -> Self {
        self.configuration = Some(class);
        self
    }
}
