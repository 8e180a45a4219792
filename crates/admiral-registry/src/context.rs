//! Application-level admin context
//!
//! One [`AdminContext`] owns everything the admin layer keeps in memory: the
//! global settings, the model registry, the extension registry and the
//! request hooks. Construct one per application (or per test) and share it
//! behind an `Arc`.

use crate::builder::ModelBuilder;
use crate::bound::BoundModelConfig;
use crate::environment::ModelEnvironment;
use crate::field_type::{FieldBehavior, FieldTypeRegistry};
use crate::lazy_model::LazyModelConfig;
use crate::queue::{BlockOrigin, DeferredBlock};
use crate::registry::ModelRegistry;
use crate::visibility;
use admiral_core::types::{
    ConfigurationAdapter, CurrentUser, ModelDiscovery, ModelIntrospection, ModelRef,
    RESERVED_NAMESPACE,
};
use admiral_core::{BoxError, Bindings, CanonicalKey, Error, RequestContext, Result, Settings};
use admiral_extensions::{
    Capabilities, CurrentUserHook, ExtensionModule, ExtensionRegistry, HookResult, RequestHook,
    RequestHooks,
};
use parking_lot::{RwLock, RwLockReadGuard};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

type Initializer = Arc<dyn Fn(&AdminContext) -> Result<()> + Send + Sync>;

/// Process-wide admin configuration state
pub struct AdminContext {
    env: Arc<ModelEnvironment>,
    registry: ModelRegistry,
    discovery: Arc<dyn ModelDiscovery>,
    extensions: RwLock<ExtensionRegistry>,
    hooks: RwLock<RequestHooks>,
    initializers: RwLock<Vec<Initializer>>,
    booting: AtomicBool,
}

/// Restores the previous boot flag when dropped
struct BootGuard<'a> {
    flag: &'a AtomicBool,
    previous: bool,
}

impl<'a> BootGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        let previous = flag.swap(true, Ordering::AcqRel);
        Self { flag, previous }
    }
}

impl Drop for BootGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(self.previous, Ordering::Release);
    }
}

impl AdminContext {
    /// Context with default settings over the given collaborators
    pub fn new(
        discovery: Arc<dyn ModelDiscovery>,
        introspection: Arc<dyn ModelIntrospection>,
    ) -> Self {
        Self::with_settings(discovery, introspection, Settings::default())
    }

    /// Context starting from `settings`
    pub fn with_settings(
        discovery: Arc<dyn ModelDiscovery>,
        introspection: Arc<dyn ModelIntrospection>,
        settings: Settings,
    ) -> Self {
        let env = Arc::new(ModelEnvironment::new(settings, introspection));
        Self {
            registry: ModelRegistry::new(env.clone()),
            env,
            discovery,
            extensions: RwLock::new(ExtensionRegistry::new()),
            hooks: RwLock::new(RequestHooks::new()),
            initializers: RwLock::new(Vec::new()),
            booting: AtomicBool::new(false),
        }
    }

    // Settings

    pub fn settings(&self) -> RwLockReadGuard<'_, Settings> {
        self.env.settings()
    }

    /// Change settings; cached field lists are rebuilt on next read
    pub fn update_settings<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> R {
        self.env.update_settings(f)
    }

    /// Set the default search operator, rejecting unknown operators
    pub fn set_default_search_operator(&self, operator: &str) -> Result<()> {
        self.update_settings(|s| s.set_default_search_operator(operator))
    }

    pub fn field_types(&self) -> RwLockReadGuard<'_, FieldTypeRegistry> {
        self.env.field_types()
    }

    pub fn register_field_type(&self, tag: impl Into<String>, behavior: FieldBehavior) {
        self.env.register_field_type(tag, behavior);
    }

    // Model registry

    /// Configuration for a model, created on first reference
    pub fn model<'a>(&self, entity: impl Into<ModelRef<'a>>) -> Result<Arc<LazyModelConfig>> {
        let key = entity.into().resolve()?;
        Ok(self.registry.get_or_create(&key))
    }

    /// Configuration for a model with `block` recorded for later evaluation
    ///
    /// Inside [`boot`](Self::boot) the block is a boot-time block.
    #[track_caller]
    pub fn model_with<'a, F>(
        &self,
        entity: impl Into<ModelRef<'a>>,
        block: F,
    ) -> Result<Arc<LazyModelConfig>>
    where
        F: Fn(&mut ModelBuilder<'_>) + Send + Sync + 'static,
    {
        let origin = if self.is_booting() {
            BlockOrigin::Boot
        } else {
            BlockOrigin::AdHoc
        };
        let block = DeferredBlock::new(Arc::new(block), origin);
        let config = self.model(entity)?;
        config.add_deferred_block(block);
        Ok(config)
    }

    /// Run an application initializer in boot mode and remember it for reloads
    pub fn boot<F>(&self, initializer: F) -> Result<()>
    where
        F: Fn(&AdminContext) -> Result<()> + Send + Sync + 'static,
    {
        let initializer: Initializer = Arc::new(initializer);
        self.initializers.write().push(initializer.clone());
        let _guard = BootGuard::enter(&self.booting);
        initializer(self)
    }

    /// Whether an initializer is running
    pub fn is_booting(&self) -> bool {
        self.booting.load(Ordering::Acquire)
    }

    /// Every discovered model name minus the blocklist, deduplicated and sorted
    ///
    /// The allowlist is not applied here; see [`models`](Self::models).
    pub fn models_pool(&self) -> Result<Vec<String>> {
        let discovered = self.discovery.discover_model_names()?;
        let settings = self.settings();
        let pool: BTreeSet<String> = discovered
            .into_iter()
            .filter(|name| !name.starts_with(RESERVED_NAMESPACE))
            .filter(|name| !settings.excluded_models.contains(name))
            .collect();
        Ok(pool.into_iter().collect())
    }

    /// Configurations of every model in play
    ///
    /// Candidates are the allowlist when it is set, the discovered models
    /// otherwise; the blocklist is subtracted and models introspection does
    /// not know are skipped.
    pub fn models(&self) -> Result<Vec<Arc<LazyModelConfig>>> {
        let (included, excluded) = {
            let settings = self.settings();
            (settings.included_models.clone(), settings.excluded_models.clone())
        };

        let candidates = if included.is_empty() {
            self.discovery.discover_model_names()?
        } else {
            included.clone()
        };
        let names: BTreeSet<String> = candidates
            .into_iter()
            .filter(|name| !name.starts_with(RESERVED_NAMESPACE))
            .filter(|name| !excluded.contains(name))
            .collect();

        let mut configs = Vec::with_capacity(names.len());
        for name in names {
            let key = admiral_core::types::resolve(&name)?;
            let config = match self.registry.get(&key) {
                Some(config) => config,
                None if self.env.lookup(&key).is_some() => self.registry.get_or_create(&key),
                None => {
                    if included.contains(&name) {
                        warn!(model = %key, "Included model has no introspectable schema");
                    }
                    continue;
                }
            };
            if config.abstract_model().is_some() {
                configs.push(config);
            }
        }
        Ok(configs)
    }

    /// Models to show for a request, in display order
    pub fn visible_models(&self, bindings: &Bindings) -> Result<Vec<BoundModelConfig>> {
        visibility::visible_models(&self.models()?, bindings)
    }

    /// Registered model configurations in first-reference order
    pub fn registered_models(&self) -> Vec<CanonicalKey> {
        self.registry.keys()
    }

    /// Drop one model's configuration; it is rebuilt fresh on next reference
    pub fn reset_model<'a>(&self, entity: impl Into<ModelRef<'a>>) -> Result<bool> {
        let key = entity.into().resolve()?;
        Ok(self.registry.remove(&key))
    }

    /// Drop every model configuration and the discovery memo, keeping global settings
    pub fn reset_all_models(&self) {
        self.registry.clear();
        self.discovery.reset();
    }

    /// Restore default settings and hooks, clear the registry and collaborator caches
    ///
    /// Registered extensions and recorded initializers are kept.
    pub fn reset(&self) {
        self.update_settings(Settings::reset);
        self.registry.clear();
        self.hooks.write().reset();
        self.extensions.write().reset();
        self.discovery.reset();
        info!("Reset admin configuration");
    }

    /// Handle a code reload of the host application
    ///
    /// Clears the registry and the discovery memo, then runs every recorded
    /// initializer again so boot-time blocks are recorded fresh.
    pub fn reload(&self) -> Result<()> {
        self.reset_all_models();

        let initializers: Vec<Initializer> = self.initializers.read().clone();
        let _guard = BootGuard::enter(&self.booting);
        for initializer in &initializers {
            initializer(self)?;
        }
        info!(initializers = initializers.len(), "Reloaded admin configuration");
        Ok(())
    }

    // Extensions and hooks

    /// Register an extension's adapters for `capabilities`
    pub fn add_extension(
        &self,
        name: &str,
        module: &ExtensionModule,
        capabilities: Capabilities,
    ) -> Result<()> {
        self.extensions
            .write()
            .add_extension(name, module, capabilities)
    }

    pub fn extensions(&self) -> RwLockReadGuard<'_, ExtensionRegistry> {
        self.extensions.read()
    }

    pub fn authenticate_with<F>(&self, hook: F) -> RequestHook
    where
        F: Fn(&mut RequestContext) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.write().authenticate_with(hook)
    }

    pub fn authentication_hook(&self) -> RequestHook {
        self.hooks.read().authentication_hook()
    }

    /// Custom authorization hook
    pub fn authorize_with<F>(&self, hook: F) -> RequestHook
    where
        F: Fn(&mut RequestContext) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.write().authorize_with(hook)
    }

    /// Authorize through a registered extension
    ///
    /// The adapter's one-time setup runs with no lock held.
    pub fn authorize_with_extension(&self, name: &str, args: Vec<Value>) -> Result<RequestHook> {
        let class = self
            .extensions
            .read()
            .authorization_adapter(name)
            .cloned()
            .ok_or_else(|| Error::unknown_extension(name, Capabilities::AUTHORIZATION.label()))?;
        self.setup_extension(name, Capabilities::AUTHORIZATION, || class.run_setup())?;
        Ok(self.hooks.write().authorize_with_class(name, class, args))
    }

    pub fn authorization_hook(&self) -> RequestHook {
        self.hooks.read().authorization_hook()
    }

    /// Custom auditing hook
    pub fn audit_with<F>(&self, hook: F) -> RequestHook
    where
        F: Fn(&mut RequestContext) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.write().audit_with(hook)
    }

    /// Audit through a registered extension
    pub fn audit_with_extension(&self, name: &str, args: Vec<Value>) -> Result<RequestHook> {
        let class = self
            .extensions
            .read()
            .auditing_adapter(name)
            .cloned()
            .ok_or_else(|| Error::unknown_extension(name, Capabilities::AUDITING.label()))?;
        self.setup_extension(name, Capabilities::AUDITING, || class.run_setup())?;
        Ok(self.hooks.write().audit_with_class(name, class, args))
    }

    fn setup_extension(
        &self,
        name: &str,
        capability: Capabilities,
        setup: impl FnOnce() -> std::result::Result<(), BoxError>,
    ) -> Result<()> {
        let pending = self.extensions.read().setup_pending(name, capability)?;
        if !pending {
            return Ok(());
        }
        setup().map_err(|e| Error::hook(format!("{} setup", name), e))?;
        self.extensions.write().mark_setup_done(name, capability);
        Ok(())
    }

    pub fn auditing_hook(&self) -> RequestHook {
        self.hooks.read().auditing_hook()
    }

    pub fn current_user_method<F>(&self, hook: F) -> CurrentUserHook
    where
        F: Fn(&RequestContext) -> Option<CurrentUser> + Send + Sync + 'static,
    {
        self.hooks.write().current_user_method(hook)
    }

    pub fn current_user_hook(&self) -> CurrentUserHook {
        self.hooks.read().current_user_hook()
    }

    /// Configure settings through a registered configuration adapter
    ///
    /// `configure` runs with no lock held and may read the context; only
    /// applying the adapter to the settings takes the settings lock.
    pub fn configure_with<F>(&self, name: &str, configure: F) -> Result<Box<dyn ConfigurationAdapter>>
    where
        F: FnOnce(&mut dyn ConfigurationAdapter) -> std::result::Result<(), BoxError>,
    {
        let class = self.extensions.read().configuration_class(name)?;
        let adapter = class.configure(configure)?;
        self.update_settings(|settings| adapter.apply(settings))
            .map_err(|e| Error::hook("configure_with", e))?;
        Ok(adapter)
    }

    /// Run the request hooks and build the request's bindings
    pub fn prepare_request(&self, request: &mut RequestContext) -> Result<Bindings> {
        let hooks = self.hooks.read().clone();
        hooks.prepare(request)
    }
}

impl fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminContext")
            .field("models", &self.registry.len())
            .field("initializers", &self.initializers.read().len())
            .field("booting", &self.is_booting())
            .finish_non_exhaustive()
    }
}
