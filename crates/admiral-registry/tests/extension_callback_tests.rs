//! Extension callbacks that read the admin context while they run

mod common;

use admiral_core::Error;
use admiral_extensions::{AdapterClass, Capabilities, ExtensionModule};
use admiral_registry::AdminContext;
use common::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Run `f` against a shared context on another thread, failing if it stalls
fn within_timeout<T: Send + 'static>(
    admin: Arc<AdminContext>,
    f: impl FnOnce(&AdminContext) -> T + Send + 'static,
) -> T {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f(&admin));
    });
    rx.recv_timeout(Duration::from_secs(5))
        .expect("callback did not return; the context is still locked")
}

fn with_page_size_extension() -> Arc<AdminContext> {
    let admin = sample_admin();
    admin
        .add_extension(
            "page_size",
            &ExtensionModule::new().with_configuration(page_size_configuration()),
            Capabilities::CONFIGURATION,
        )
        .unwrap();
    Arc::new(admin)
}

#[test]
fn test_configure_with_callback_reads_settings() {
    let admin = with_page_size_extension();

    let seen = within_timeout(admin.clone(), |admin| {
        let mut seen = None;
        admin
            .configure_with("page_size", |config| {
                seen = Some(admin.settings().default_items_per_page);
                assert_eq!(admin.extensions().extensions().count(), 1);
                config.set("items_per_page", json!(50))
            })
            .unwrap();
        seen
    });

    assert_eq!(seen, Some(20));
    assert_eq!(admin.settings().default_items_per_page, 50);
}

#[test]
fn test_configure_with_failure_leaves_settings() {
    let admin = with_page_size_extension();

    let err = admin
        .configure_with("page_size", |config| config.set("theme", json!("dark")))
        .unwrap_err();
    assert!(matches!(err, Error::Hook { .. }));
    assert_eq!(admin.settings().default_items_per_page, 20);

    let err = admin.configure_with("missing", |_| Ok(())).unwrap_err();
    assert!(matches!(err, Error::UnknownExtension { .. }));
}

#[test]
fn test_adapter_setup_reads_context_and_runs_once() {
    let admin = Arc::new(sample_admin());
    let setups = Arc::new(AtomicUsize::new(0));

    let weak = Arc::downgrade(&admin);
    let counter = setups.clone();
    let class = deny_models().with_setup(move || {
        let admin = weak.upgrade().ok_or("context dropped")?;
        assert_eq!(admin.settings().default_items_per_page, 20);
        assert!(admin.extensions().capabilities("deny").contains(Capabilities::AUTHORIZATION));
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    admin
        .add_extension(
            "deny",
            &ExtensionModule::new().with_authorization(class),
            Capabilities::AUTHORIZATION,
        )
        .unwrap();

    within_timeout(admin.clone(), |admin| {
        admin.authorize_with_extension("deny", vec![json!("Team")]).unwrap();
        admin.authorize_with_extension("deny", vec![json!("Fan")]).unwrap();
    });
    assert_eq!(setups.load(Ordering::SeqCst), 1);

    admin.reset();
    admin.authorize_with_extension("deny", Vec::new()).unwrap();
    assert_eq!(setups.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failing_setup_is_retried() {
    let admin = sample_admin();
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let class = AdapterClass::new(|_: &admiral_core::RequestContext, _: &[serde_json::Value]| {
        Ok(Arc::new(BrokenAuthorization) as Arc<dyn admiral_core::types::AuthorizationAdapter>)
    })
    .with_setup(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err("policy store not ready".into())
        } else {
            Ok(())
        }
    });
    admin
        .add_extension(
            "flaky",
            &ExtensionModule::new().with_authorization(class),
            Capabilities::AUTHORIZATION,
        )
        .unwrap();

    let err = admin.authorize_with_extension("flaky", Vec::new()).err().expect("expected setup failure");
    assert_eq!(err.to_string(), "flaky setup hook failed: policy store not ready");

    admin.authorize_with_extension("flaky", Vec::new()).unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
