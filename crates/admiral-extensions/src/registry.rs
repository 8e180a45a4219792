//! Extension adapter registry
//!
//! Maps symbolic extension names to adapter classes, one table per capability.
//! Registering a name again only touches the capabilities asked for, so an
//! extension can contribute its authorization and auditing adapters in
//! separate calls.

use crate::adapter::{
    AuditingAdapterClass, AuthorizationAdapterClass, ConfigurationAdapterClass, ExtensionModule,
};
use crate::capabilities::Capabilities;
use admiral_core::types::ConfigurationAdapter;
use admiral_core::{BoxError, Error, Result, Settings};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Registered extensions and their adapter classes
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    /// Extension names in first-registration order
    extensions: IndexSet<String>,

    authorization: HashMap<String, AuthorizationAdapterClass>,
    auditing: HashMap<String, AuditingAdapterClass>,
    configuration: HashMap<String, ConfigurationAdapterClass>,

    /// (name, capability) pairs whose class-level setup already ran
    setup_done: HashSet<(String, Capabilities)>,
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the adapters `module` provides for `capabilities` under `name`
    ///
    /// Capabilities not listed are left as previously registered. Fails without
    /// registering anything if `module` lacks a requested capability.
    pub fn add_extension(
        &mut self,
        name: &str,
        module: &ExtensionModule,
        capabilities: Capabilities,
    ) -> Result<()> {
        for capability in capabilities.iter() {
            let provided = if capability == Capabilities::AUTHORIZATION {
                module.authorization.is_some()
            } else if capability == Capabilities::AUDITING {
                module.auditing.is_some()
            } else {
                module.configuration.is_some()
            };
            if !provided {
                return Err(Error::missing_adapter(name, capability.label()));
            }
        }

        self.extensions.insert(name.to_string());

        if let (true, Some(class)) = (
            capabilities.contains(Capabilities::AUTHORIZATION),
            &module.authorization,
        ) {
            self.authorization.insert(name.to_string(), class.clone());
        }
        if let (true, Some(class)) = (
            capabilities.contains(Capabilities::AUDITING),
            &module.auditing,
        ) {
            self.auditing.insert(name.to_string(), class.clone());
        }
        if let (true, Some(class)) = (
            capabilities.contains(Capabilities::CONFIGURATION),
            &module.configuration,
        ) {
            self.configuration.insert(name.to_string(), class.clone());
        }

        for capability in capabilities.iter() {
            self.setup_done.remove(&(name.to_string(), capability));
        }

        info!("Registered extension '{}' ({})", name, capabilities);
        Ok(())
    }

    /// Extension names in first-registration order
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Capabilities currently registered under `name`
    pub fn capabilities(&self, name: &str) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::AUTHORIZATION, self.authorization.contains_key(name));
        caps.set(Capabilities::AUDITING, self.auditing.contains_key(name));
        caps.set(Capabilities::CONFIGURATION, self.configuration.contains_key(name));
        caps
    }

    /// Authorization adapter class registered under `name`
    pub fn authorization_adapter(&self, name: &str) -> Option<&AuthorizationAdapterClass> {
        self.authorization.get(name)
    }

    /// Auditing adapter class registered under `name`
    pub fn auditing_adapter(&self, name: &str) -> Option<&AuditingAdapterClass> {
        self.auditing.get(name)
    }

    /// Configuration adapter class registered under `name`
    pub fn configuration_adapter(&self, name: &str) -> Option<&ConfigurationAdapterClass> {
        self.configuration.get(name)
    }

    /// Whether `name`'s adapter for `capability` has a setup that has not run yet
    pub fn setup_pending(&self, name: &str, capability: Capabilities) -> Result<bool> {
        let has_setup = if capability == Capabilities::AUTHORIZATION {
            self.authorization_adapter(name).map(|class| class.has_setup())
        } else if capability == Capabilities::AUDITING {
            self.auditing_adapter(name).map(|class| class.has_setup())
        } else {
            None
        };

        match has_setup {
            None => Err(Error::unknown_extension(name, capability.label())),
            Some(has_setup) => {
                Ok(has_setup && !self.setup_done.contains(&(name.to_string(), capability)))
            }
        }
    }

    /// Record that the setup of `name`'s adapter for `capability` ran
    pub fn mark_setup_done(&mut self, name: &str, capability: Capabilities) {
        debug!("Ran {} setup for extension '{}'", capability.label(), name);
        self.setup_done.insert((name.to_string(), capability));
    }

    /// Run the class-level setup of `name`'s adapter for `capability` once
    ///
    /// Callers sharing the registry behind a lock should use
    /// [`setup_pending`](Self::setup_pending) and
    /// [`mark_setup_done`](Self::mark_setup_done) and run the setup unlocked.
    pub fn setup_once(&mut self, name: &str, capability: Capabilities) -> Result<()> {
        if !self.setup_pending(name, capability)? {
            return Ok(());
        }

        let outcome = if capability == Capabilities::AUTHORIZATION {
            self.authorization_adapter(name).map(|class| class.run_setup())
        } else {
            self.auditing_adapter(name).map(|class| class.run_setup())
        };
        if let Some(Err(source)) = outcome {
            return Err(Error::hook(format!("{} setup", name), source));
        }
        self.mark_setup_done(name, capability);
        Ok(())
    }

    /// Instantiate the configuration adapter registered under `name`
    ///
    /// The fresh adapter is handed to `configure`, then applied to `settings`
    /// and returned.
    pub fn configure_with<F>(
        &self,
        name: &str,
        settings: &mut Settings,
        configure: F,
    ) -> Result<Box<dyn ConfigurationAdapter>>
    where
        F: FnOnce(&mut dyn ConfigurationAdapter) -> std::result::Result<(), BoxError>,
    {
        let adapter = self.configuration_class(name)?.configure(configure)?;
        adapter
            .apply(settings)
            .map_err(|e| Error::hook("configure_with", e))?;
        Ok(adapter)
    }

    /// Configuration adapter class registered under `name`, or an error naming it
    pub fn configuration_class(&self, name: &str) -> Result<ConfigurationAdapterClass> {
        self.configuration_adapter(name)
            .cloned()
            .ok_or_else(|| Error::unknown_extension(name, Capabilities::CONFIGURATION.label()))
    }

    /// Forget which setups already ran; registrations are kept
    pub fn reset(&mut self) {
        self.setup_done.clear();
    }
}
