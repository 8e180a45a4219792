//! Request context and the bindings rules are evaluated against

use crate::types::{AbstractModel, AuditingAdapter, AuthorizationAdapter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The user a request acts on behalf of
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User identifier
    pub id: String,

    /// Role names
    #[serde(default)]
    pub roles: Vec<String>,

    /// Free-form user attributes
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl CurrentUser {
    /// Create a user with no roles
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Add a role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Whether the user holds `role`
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Controller-equivalent execution context of one request
///
/// Request hooks run against it; adapters they install are stored here for the
/// duration of the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    session_user: Option<CurrentUser>,
    authorization_adapter: Option<Arc<dyn AuthorizationAdapter>>,
    auditing_adapter: Option<Arc<dyn AuditingAdapter>>,
}

impl RequestContext {
    /// Create an anonymous request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context whose session is already authenticated as `user`
    pub fn with_session_user(mut self, user: CurrentUser) -> Self {
        self.session_user = Some(user);
        self
    }

    /// User established by authentication, if any
    pub fn session_user(&self) -> Option<&CurrentUser> {
        self.session_user.as_ref()
    }

    /// Set the authenticated user
    pub fn set_session_user(&mut self, user: Option<CurrentUser>) {
        self.session_user = user;
    }

    /// Authorization adapter installed for this request
    pub fn authorization_adapter(&self) -> Option<&Arc<dyn AuthorizationAdapter>> {
        self.authorization_adapter.as_ref()
    }

    /// Install an authorization adapter for this request
    pub fn set_authorization_adapter(&mut self, adapter: Arc<dyn AuthorizationAdapter>) {
        self.authorization_adapter = Some(adapter);
    }

    /// Auditing adapter installed for this request
    pub fn auditing_adapter(&self) -> Option<&Arc<dyn AuditingAdapter>> {
        self.auditing_adapter.as_ref()
    }

    /// Install an auditing adapter for this request
    pub fn set_auditing_adapter(&mut self, adapter: Arc<dyn AuditingAdapter>) {
        self.auditing_adapter = Some(adapter);
    }
}

/// Request-scoped values visible to rules and authorization checks
///
/// This is the complete set of accessors a rule may use.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    current_user: Option<CurrentUser>,
    authorization_adapter: Option<Arc<dyn AuthorizationAdapter>>,
    abstract_model: Option<AbstractModel>,
}

impl Bindings {
    /// Empty bindings: no user, no authorization adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings for a request, given the user resolved by the current-user hook
    pub fn for_request(request: &RequestContext, current_user: Option<CurrentUser>) -> Self {
        Self {
            current_user,
            authorization_adapter: request.authorization_adapter().cloned(),
            abstract_model: None,
        }
    }

    /// Set the current user
    pub fn with_current_user(mut self, user: CurrentUser) -> Self {
        self.current_user = Some(user);
        self
    }

    /// Set the authorization adapter handle
    pub fn with_authorization_adapter(mut self, adapter: Arc<dyn AuthorizationAdapter>) -> Self {
        self.authorization_adapter = Some(adapter);
        self
    }

    /// Specialize the bindings to one model
    pub fn with_abstract_model(mut self, model: Option<AbstractModel>) -> Self {
        self.abstract_model = model;
        self
    }

    /// Current user, if any
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// Authorization adapter handle, if one is installed
    pub fn authorization_adapter(&self) -> Option<&Arc<dyn AuthorizationAdapter>> {
        self.authorization_adapter.as_ref()
    }

    /// The model these bindings are specialized to
    pub fn abstract_model(&self) -> Option<&AbstractModel> {
        self.abstract_model.as_ref()
    }

    /// Whether the current user holds `role`
    pub fn user_has_role(&self, role: &str) -> bool {
        self.current_user.as_ref().is_some_and(|u| u.has_role(role))
    }
}
