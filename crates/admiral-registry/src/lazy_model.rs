//! Lazily evaluated configuration of one model
//!
//! Blocks are only recorded when added. The first read replays them into a
//! [`ModelDeclaration`] (model-level cache); field lists are then built per
//! section on demand (field-level cache). Adding a block drops both caches;
//! a settings or field type change makes the field caches stale.

use crate::bound::BoundModelConfig;
use crate::builder::ModelBuilder;
use crate::declaration::ModelDeclaration;
use crate::environment::ModelEnvironment;
use crate::field::{materialize_fields, FieldConfig};
use crate::queue::{BlockOrigin, DeferredBlock, DeferredQueue};
use crate::rule::Rule;
use crate::section::Section;
use admiral_core::types::AbstractModel;
use admiral_core::utils::{demodulize, humanize, pluralize};
use admiral_core::{BoxError, Bindings, CanonicalKey, Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Default)]
struct LazyState {
    queue: DeferredQueue,
    /// Incremented whenever the queue changes or caches are dropped
    version: u64,
    declaration: Option<Arc<ModelDeclaration>>,
    fields: HashMap<Section, CachedFields>,
}

struct CachedFields {
    generation: u64,
    fields: Arc<Vec<FieldConfig>>,
}

/// Configuration of one model, created on first reference
pub struct LazyModelConfig {
    key: CanonicalKey,
    abstract_model: Option<AbstractModel>,
    env: Arc<ModelEnvironment>,
    state: RwLock<LazyState>,
}

impl LazyModelConfig {
    pub(crate) fn new(key: CanonicalKey, env: Arc<ModelEnvironment>) -> Self {
        let abstract_model = env.lookup(&key);
        Self {
            key,
            abstract_model,
            env,
            state: RwLock::new(LazyState::default()),
        }
    }

    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Introspected model, if the key names one
    pub fn abstract_model(&self) -> Option<&AbstractModel> {
        self.abstract_model.as_ref()
    }

    /// Record a block; it runs on the next read
    pub fn add_deferred_block(&self, block: DeferredBlock) {
        let mut state = self.state.write();
        trace!(model = %self.key, origin = ?block.origin(), at = %block.location(), "Deferred block");
        state.queue.enqueue(block);
        Self::drop_caches(&mut state);
    }

    /// Record an ad-hoc configuration block
    #[track_caller]
    pub fn configure<F>(&self, f: F)
    where
        F: Fn(&mut ModelBuilder<'_>) + Send + Sync + 'static,
    {
        self.add_deferred_block(DeferredBlock::new(Arc::new(f), BlockOrigin::AdHoc));
    }

    /// Number of recorded blocks
    pub fn pending_blocks(&self) -> usize {
        self.state.read().queue.len()
    }

    /// Whether the recorded blocks have been replayed since the last change
    pub fn is_flushed(&self) -> bool {
        self.state.read().declaration.is_some()
    }

    /// Replay recorded blocks if needed and return the resulting declaration
    ///
    /// Blocks run without holding the config's lock.
    pub fn flush(&self) -> Arc<ModelDeclaration> {
        let (queue, version) = {
            let state = self.state.read();
            if let Some(declaration) = &state.declaration {
                return declaration.clone();
            }
            (state.queue.clone(), state.version)
        };

        let declaration = Arc::new(queue.replay());
        debug!(model = %self.key, blocks = queue.len(), "Flushed configuration blocks");

        let mut state = self.state.write();
        if state.version == version {
            state.declaration = Some(declaration.clone());
        }
        declaration
    }

    fn drop_caches(state: &mut LazyState) {
        state.version += 1;
        state.declaration = None;
        state.fields.clear();
    }

    /// Fields of the base section
    pub fn fields(&self) -> Result<Arc<Vec<FieldConfig>>> {
        self.fields_for(Section::Base)
    }

    /// Fields of `section`, in display order
    pub fn fields_for(&self, section: Section) -> Result<Arc<Vec<FieldConfig>>> {
        let generation = self.env.generation();
        {
            let state = self.state.read();
            if let Some(cached) = state.fields.get(&section) {
                if cached.generation == generation && state.declaration.is_some() {
                    return Ok(cached.fields.clone());
                }
            }
        }

        let version = self.state.read().version;
        let declaration = self.flush();
        let fields = {
            let settings = self.env.settings();
            let field_types = self.env.field_types();
            materialize_fields(
                &self.key,
                self.abstract_model.as_ref(),
                &declaration,
                section,
                &settings,
                &field_types,
            )?
        };
        let fields = Arc::new(fields);

        let mut state = self.state.write();
        if state.version == version {
            state.fields.insert(
                section,
                CachedFields {
                    generation,
                    fields: fields.clone(),
                },
            );
        }
        Ok(fields)
    }

    /// One field of `section` by name
    pub fn field(&self, section: Section, name: &str) -> Result<Option<FieldConfig>> {
        Ok(self
            .fields_for(section)?
            .iter()
            .find(|f| f.name() == name)
            .cloned())
    }

    /// Specialize to one request's bindings
    pub fn with(self: &Arc<Self>, bindings: Bindings) -> BoundModelConfig {
        BoundModelConfig::new(self.clone(), bindings)
    }

    fn evaluate<T: Clone>(&self, rule: &Rule<T>, attribute: &str, bindings: &Bindings) -> Result<T> {
        rule.evaluate(bindings)
            .map_err(|e: BoxError| Error::predicate(self.key.as_str(), attribute, e))
    }

    /// Visibility under `bindings`; visible unless configured otherwise
    pub fn visible_for(&self, bindings: &Bindings) -> Result<bool> {
        match &self.flush().visible {
            Some(rule) => self.evaluate(rule, "visible", bindings),
            None => Ok(true),
        }
    }

    /// Weight under `bindings`; 0 unless configured
    pub fn weight_for(&self, bindings: &Bindings) -> Result<i32> {
        match &self.flush().weight {
            Some(rule) => self.evaluate(rule, "weight", bindings),
            None => Ok(0),
        }
    }

    /// Label under `bindings`; the humanized model name unless configured
    pub fn label_for(&self, bindings: &Bindings) -> Result<String> {
        match &self.flush().label {
            Some(rule) => self.evaluate(rule, "label", bindings),
            None => Ok(self.default_label()),
        }
    }

    pub fn label_plural_for(&self, bindings: &Bindings) -> Result<String> {
        match &self.flush().label_plural {
            Some(rule) => self.evaluate(rule, "label_plural", bindings),
            None => Ok(pluralize(&self.label_for(bindings)?)),
        }
    }

    /// Visibility without request bindings
    pub fn visible(&self) -> Result<bool> {
        self.visible_for(&self.unbound())
    }

    pub fn weight(&self) -> Result<i32> {
        self.weight_for(&self.unbound())
    }

    pub fn label(&self) -> Result<String> {
        self.label_for(&self.unbound())
    }

    pub fn label_plural(&self) -> Result<String> {
        self.label_plural_for(&self.unbound())
    }

    fn unbound(&self) -> Bindings {
        Bindings::new().with_abstract_model(self.abstract_model.clone())
    }

    fn default_label(&self) -> String {
        humanize(demodulize(self.key.as_str()))
    }

    pub fn navigation_label(&self) -> Option<String> {
        self.flush().navigation_label.clone()
    }

    /// Attribute used to label records
    ///
    /// Defaults to the first of the global label methods the model has.
    pub fn object_label_method(&self) -> Option<String> {
        if let Some(method) = &self.flush().object_label_method {
            return Some(method.clone());
        }
        let model = self.abstract_model.as_ref()?;
        self.env
            .settings()
            .label_methods
            .iter()
            .find(|method| model.property(method).is_some())
            .cloned()
    }

    pub fn items_per_page(&self) -> u32 {
        self.flush()
            .items_per_page
            .unwrap_or_else(|| self.env.settings().default_items_per_page)
    }

    pub fn associated_collection_limit(&self) -> u32 {
        self.flush()
            .associated_collection_limit
            .unwrap_or_else(|| self.env.settings().default_associated_collection_limit)
    }

    /// Absent from a non-empty allowlist or present in the blocklist
    pub fn is_excluded(&self) -> bool {
        self.env.settings().is_excluded(&self.key)
    }

    /// Human label of one record
    ///
    /// Uses the object label method when the record carries it as a non-empty
    /// value, `"<Label> #<id>"` otherwise.
    pub fn record_label(&self, record: &serde_json::Value) -> Result<String> {
        let from_method = self
            .object_label_method()
            .and_then(|method| record.get(&method).and_then(value_to_label));
        if let Some(label) = from_method {
            return Ok(label);
        }

        let id = record
            .get("id")
            .and_then(value_to_label)
            .unwrap_or_default();
        Ok(format!("{} #{}", self.label()?, id))
    }
}

fn value_to_label(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl fmt::Debug for LazyModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("LazyModelConfig")
            .field("key", &self.key)
            .field("blocks", &state.queue.len())
            .field("flushed", &state.declaration.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admiral_core::types::{ModelIntrospection, ModelSchema, Property};
    use admiral_core::Settings;
    use serde_json::json;

    struct SingleModel(Arc<ModelSchema>);

    impl ModelIntrospection for SingleModel {
        fn lookup(&self, key: &CanonicalKey) -> Option<AbstractModel> {
            (key.as_str() == self.0.name).then(|| AbstractModel::new(self.0.clone()))
        }
    }

    fn config(name: &str) -> Arc<LazyModelConfig> {
        let schema = ModelSchema::new("Blog::BlogPost")
            .with_property(Property::new("id", "integer"))
            .with_property(Property::new("title", "string"));
        let env = Arc::new(ModelEnvironment::new(
            Settings::default(),
            Arc::new(SingleModel(Arc::new(schema))),
        ));
        Arc::new(LazyModelConfig::new(CanonicalKey::new(name).unwrap(), env))
    }

    #[test]
    fn test_blocks_are_deferred_until_read() {
        let post = config("Blog::BlogPost");
        post.configure(|m| {
            m.weight(5);
        });

        assert_eq!(post.pending_blocks(), 1);
        assert!(!post.is_flushed());
        assert_eq!(post.weight().unwrap(), 5);
        assert!(post.is_flushed());

        post.configure(|m| {
            m.weight(7);
        });
        assert!(!post.is_flushed());
        assert_eq!(post.weight().unwrap(), 7);
    }

    #[test]
    fn test_defaults() {
        let post = config("Blog::BlogPost");
        assert!(post.visible().unwrap());
        assert_eq!(post.weight().unwrap(), 0);
        assert_eq!(post.label().unwrap(), "Blog post");
        assert_eq!(post.label_plural().unwrap(), "Blog posts");
        assert_eq!(post.items_per_page(), 20);
        assert_eq!(post.associated_collection_limit(), 100);
        assert_eq!(post.object_label_method().as_deref(), Some("title"));
    }

    #[test]
    fn test_field_cache_follows_generation() {
        let post = config("Blog::BlogPost");
        let first = post.fields().unwrap();
        assert!(Arc::ptr_eq(&first, &post.fields().unwrap()));

        post.env.update_settings(|s| s.set_default_hidden_fields(vec!["title"]));
        let second = post.fields().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_record_label() {
        let post = config("Blog::BlogPost");
        assert_eq!(
            post.record_label(&json!({"id": 3, "title": "Hello"})).unwrap(),
            "Hello"
        );
        assert_eq!(
            post.record_label(&json!({"id": 3, "title": ""})).unwrap(),
            "Blog post #3"
        );
    }

    #[test]
    fn test_failing_rule_names_model_and_attribute() {
        let post = config("Blog::BlogPost");
        post.configure(|m| {
            m.visible_if(|_| Err("no current user".into()));
        });

        let err = post.visible().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to evaluate visible for model Blog::BlogPost: no current user"
        );
    }

    #[test]
    fn test_unknown_model_has_no_fields() {
        let missing = config("Ghost");
        assert!(missing.abstract_model().is_none());
        assert!(missing.fields().unwrap().is_empty());
        assert_eq!(missing.object_label_method(), None);
    }
}
