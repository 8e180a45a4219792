//! Request hooks and deferred adapter instantiation

mod common;

use admiral_core::types::{AdminAction, AuditAction, AuditEvent, CurrentUser};
use admiral_core::{CanonicalKey, Error, RequestContext};
use admiral_extensions::{Capabilities, ExtensionModule, ExtensionRegistry, RequestHooks};
use common::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn registry_with_full_module() -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();
    registry
        .add_extension(
            "example",
            &full_module(),
            Capabilities::AUTHORIZATION | Capabilities::AUDITING,
        )
        .unwrap();
    registry
}

#[test]
fn test_authorize_with_extension_instantiates_per_request() {
    let mut registry = registry_with_full_module();
    let mut hooks = RequestHooks::new();
    hooks
        .authorize_with_extension(&mut registry, "example", vec![json!("editor")])
        .unwrap();

    let mut editor =
        RequestContext::new().with_session_user(CurrentUser::new("1").with_role("editor"));
    let bindings = hooks.prepare(&mut editor).unwrap();
    let adapter = bindings.authorization_adapter().unwrap();
    assert!(adapter.authorized(AdminAction::Index, None).unwrap());

    let mut guest = RequestContext::new().with_session_user(CurrentUser::new("2"));
    let bindings = hooks.prepare(&mut guest).unwrap();
    let adapter = bindings.authorization_adapter().unwrap();
    assert!(!adapter.authorized(AdminAction::Index, None).unwrap());
}

#[test]
fn test_authorize_with_unknown_extension() {
    let mut registry = ExtensionRegistry::new();
    let mut hooks = RequestHooks::new();

    let err = hooks
        .authorize_with_extension(&mut registry, "missing", Vec::new())
        .err().expect("expected unknown extension error");
    assert!(matches!(err, Error::UnknownExtension { .. }));
    assert!(hooks.prepare(&mut RequestContext::new()).is_ok());
}

#[test]
fn test_setup_runs_once_across_calls() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let module = ExtensionModule::new().with_auditing(memory_auditing().with_setup(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));

    let mut registry = ExtensionRegistry::new();
    registry
        .add_extension("trail", &module, Capabilities::AUDITING)
        .unwrap();

    let mut hooks = RequestHooks::new();
    hooks.audit_with_extension(&mut registry, "trail", Vec::new()).unwrap();
    hooks.audit_with_extension(&mut registry, "trail", Vec::new()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_audit_adapter_lives_on_request() {
    let mut registry = registry_with_full_module();
    let mut hooks = RequestHooks::new();
    hooks
        .audit_with_extension(&mut registry, "example", Vec::new())
        .unwrap();

    let mut request = RequestContext::new();
    hooks.prepare(&mut request).unwrap();

    let adapter = request.auditing_adapter().unwrap();
    let event = AuditEvent::new(
        AuditAction::Create,
        CanonicalKey::new("Team").unwrap(),
        "1",
    );
    adapter.record(&event).unwrap();
    assert!(RequestContext::new().auditing_adapter().is_none());
}

#[test]
fn test_custom_block_replaces_extension_hook() {
    let mut registry = registry_with_full_module();
    let mut hooks = RequestHooks::new();
    hooks
        .authorize_with_extension(&mut registry, "example", Vec::new())
        .unwrap();
    hooks.authorize_with(|request| {
        if request.session_user().is_some() {
            Ok(())
        } else {
            Err("redirect to login".into())
        }
    });

    let err = hooks.prepare(&mut RequestContext::new()).unwrap_err();
    assert_eq!(err.to_string(), "authorize hook failed: redirect to login");

    let mut signed_in = RequestContext::new().with_session_user(CurrentUser::new("1"));
    let bindings = hooks.prepare(&mut signed_in).unwrap();
    assert!(bindings.authorization_adapter().is_none());
}

#[test]
fn test_current_user_method_feeds_bindings() {
    let mut hooks = RequestHooks::new();
    hooks.current_user_method(|_| Some(CurrentUser::new("admin").with_role("admin")));

    let bindings = hooks.prepare(&mut RequestContext::new()).unwrap();
    assert!(bindings.user_has_role("admin"));
}
