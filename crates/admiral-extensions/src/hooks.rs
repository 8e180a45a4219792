//! Hooks run against each admin request
//!
//! Each getter returns the configured hook or a no-op default. Setting a hook
//! by extension name installs a deferred instantiation: the adapter is only
//! constructed when the hook runs against a request, and lives on that
//! request's context.

use crate::adapter::{AuditingAdapterClass, AuthorizationAdapterClass};
use crate::capabilities::Capabilities;
use crate::registry::ExtensionRegistry;
use admiral_core::types::CurrentUser;
use admiral_core::{BoxError, Bindings, Error, RequestContext, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a request hook
pub type HookResult = std::result::Result<(), BoxError>;

/// Hook run against a request context
pub type RequestHook = Arc<dyn Fn(&mut RequestContext) -> HookResult + Send + Sync>;

/// Hook resolving the user a request acts for
pub type CurrentUserHook = Arc<dyn Fn(&RequestContext) -> Option<CurrentUser> + Send + Sync>;

fn noop_hook() -> RequestHook {
    Arc::new(|_| Ok(()))
}

fn session_user_hook() -> CurrentUserHook {
    Arc::new(|request| request.session_user().cloned())
}

/// Authentication, authorization, auditing and current-user hooks
#[derive(Clone, Default)]
pub struct RequestHooks {
    authenticate: Option<RequestHook>,
    authorize: Option<RequestHook>,
    audit: Option<RequestHook>,
    current_user: Option<CurrentUserHook>,
}

impl RequestHooks {
    /// No hooks configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authentication hook
    pub fn authenticate_with<F>(&mut self, hook: F) -> RequestHook
    where
        F: Fn(&mut RequestContext) -> HookResult + Send + Sync + 'static,
    {
        let hook: RequestHook = Arc::new(hook);
        self.authenticate = Some(hook.clone());
        hook
    }

    /// Configured authentication hook, or a no-op
    pub fn authentication_hook(&self) -> RequestHook {
        self.authenticate.clone().unwrap_or_else(noop_hook)
    }

    /// Use a custom authorization hook, bypassing adapters
    pub fn authorize_with<F>(&mut self, hook: F) -> RequestHook
    where
        F: Fn(&mut RequestContext) -> HookResult + Send + Sync + 'static,
    {
        let hook: RequestHook = Arc::new(hook);
        self.authorize = Some(hook.clone());
        hook
    }

    /// Authorize through the adapter registered under `name`
    ///
    /// Runs the adapter's one-time setup now. The returned hook constructs the
    /// adapter with the request context and `args` and installs it on the
    /// request.
    pub fn authorize_with_extension(
        &mut self,
        registry: &mut ExtensionRegistry,
        name: &str,
        args: Vec<Value>,
    ) -> Result<RequestHook> {
        let class = registry
            .authorization_adapter(name)
            .cloned()
            .ok_or_else(|| Error::unknown_extension(name, Capabilities::AUTHORIZATION.label()))?;
        registry.setup_once(name, Capabilities::AUTHORIZATION)?;
        Ok(self.authorize_with_class(name, class, args))
    }

    /// Authorize through `class` without touching any registry
    pub fn authorize_with_class(
        &mut self,
        name: &str,
        class: AuthorizationAdapterClass,
        args: Vec<Value>,
    ) -> RequestHook {
        let hook: RequestHook = Arc::new(move |request: &mut RequestContext| {
            let adapter = class.instantiate(request, &args)?;
            request.set_authorization_adapter(adapter);
            Ok(())
        });
        debug!("Authorizing with extension '{}'", name);
        self.authorize = Some(hook.clone());
        hook
    }

    /// Configured authorization hook, or a no-op
    pub fn authorization_hook(&self) -> RequestHook {
        self.authorize.clone().unwrap_or_else(noop_hook)
    }

    /// Use a custom auditing hook, bypassing adapters
    pub fn audit_with<F>(&mut self, hook: F) -> RequestHook
    where
        F: Fn(&mut RequestContext) -> HookResult + Send + Sync + 'static,
    {
        let hook: RequestHook = Arc::new(hook);
        self.audit = Some(hook.clone());
        hook
    }

    /// Audit through the adapter registered under `name`
    pub fn audit_with_extension(
        &mut self,
        registry: &mut ExtensionRegistry,
        name: &str,
        args: Vec<Value>,
    ) -> Result<RequestHook> {
        let class = registry
            .auditing_adapter(name)
            .cloned()
            .ok_or_else(|| Error::unknown_extension(name, Capabilities::AUDITING.label()))?;
        registry.setup_once(name, Capabilities::AUDITING)?;
        Ok(self.audit_with_class(name, class, args))
    }

    /// Audit through `class` without touching any registry
    pub fn audit_with_class(
        &mut self,
        name: &str,
        class: AuditingAdapterClass,
        args: Vec<Value>,
    ) -> RequestHook {
        let hook: RequestHook = Arc::new(move |request: &mut RequestContext| {
            let adapter = class.instantiate(request, &args)?;
            request.set_auditing_adapter(adapter);
            Ok(())
        });
        debug!("Auditing with extension '{}'", name);
        self.audit = Some(hook.clone());
        hook
    }

    /// Configured auditing hook, or a no-op
    pub fn auditing_hook(&self) -> RequestHook {
        self.audit.clone().unwrap_or_else(noop_hook)
    }

    /// Set how the current user is determined
    pub fn current_user_method<F>(&mut self, hook: F) -> CurrentUserHook
    where
        F: Fn(&RequestContext) -> Option<CurrentUser> + Send + Sync + 'static,
    {
        let hook: CurrentUserHook = Arc::new(hook);
        self.current_user = Some(hook.clone());
        hook
    }

    /// Configured current-user hook, or the session user
    pub fn current_user_hook(&self) -> CurrentUserHook {
        self.current_user.clone().unwrap_or_else(session_user_hook)
    }

    /// Run authentication, authorization and auditing hooks in that order,
    /// then build the request's bindings
    pub fn prepare(&self, request: &mut RequestContext) -> Result<Bindings> {
        (self.authentication_hook())(request).map_err(|e| Error::hook("authenticate", e))?;
        (self.authorization_hook())(request).map_err(|e| Error::hook("authorize", e))?;
        (self.auditing_hook())(request).map_err(|e| Error::hook("audit", e))?;

        let user = (self.current_user_hook())(request);
        Ok(Bindings::for_request(request, user))
    }

    /// Drop every configured hook
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for RequestHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHooks")
            .field("authenticate", &self.authenticate.is_some())
            .field("authorize", &self.authorize.is_some())
            .field("audit", &self.audit.is_some())
            .field("current_user", &self.current_user.is_some())
            .finish()
    }
}
