//! Final JSON-LD context: the baseline context with annotation directives applied
//!
//! For every baseline entry keyed by a slot name:
//! - a `jsonld_id` override replaces the whole entry with the override string;
//! - otherwise an object entry with a resolved container loses its `@type`
//!   and gains `@container`.
//!
//! Entries that do not name a slot (prefixes, `@vocab`, classes) pass through.

use indexmap::IndexMap;
use linkml_core::{
    error::{LinkMLError, Result},
    types::SlotDefinition,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::annotation_resolver::{AnnotationResolver, SlotDirectives};
use crate::schema_view::SchemaView;

/// JSON-LD processing mode written to `@version`
pub const DEFAULT_CONTEXT_VERSION: f64 = 1.1;

/// Applies annotation directives to a baseline context
pub struct ContextBuilder<'a> {
    view: &'a SchemaView,
    resolver: AnnotationResolver<'a>,
    version: f64,
}

impl<'a> ContextBuilder<'a> {
    /// Create a builder over a schema view
    #[must_use]
    pub fn new(view: &'a SchemaView) -> Self {
        Self {
            view,
            resolver: AnnotationResolver::new(view),
            version: DEFAULT_CONTEXT_VERSION,
        }
    }

    /// Use a different `@version` marker
    #[must_use]
    pub fn with_version(mut self, version: f64) -> Self {
        self.version = version;
        self
    }

    /// Apply the directives of every schema slot and class attribute
    ///
    /// # Errors
    ///
    /// See [`ContextBuilder::build`].
    pub fn build_for_view(&self, baseline: Value) -> Result<Value> {
        self.build(baseline, &self.view.all_slots_with_attributes())
    }

    /// Apply the directives of `slots` to `baseline`, a `{"@context": {...}}`
    /// document, and set its `@version`
    ///
    /// # Errors
    ///
    /// Returns `LinkMLError::InvalidInput` if `baseline` has no `@context`
    /// object.
    pub fn build(&self, mut baseline: Value, slots: &IndexMap<String, SlotDefinition>) -> Result<Value> {
        let directives: IndexMap<&str, SlotDirectives> = slots
            .iter()
            .map(|(name, slot)| (name.as_str(), self.resolver.resolve(slot)))
            .collect();

        let context = baseline
            .get_mut("@context")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| LinkMLError::invalid_input("baseline context has no @context object"))?;

        context.insert("@version".to_string(), json!(self.version));

        for (key, entry) in context.iter_mut() {
            let Some(directive) = directives.get(key.as_str()) else {
                continue;
            };

            if let Some(id) = &directive.id_override {
                debug!(slot = %key, id = %id, "replacing context entry with id override");
                *entry = Value::String(id.clone());
                continue;
            }

            let Some(object) = entry.as_object_mut() else {
                continue;
            };

            if let Some(container) = &directive.container
                && !container.is_empty()
            {
                debug!(slot = %key, container = %container, "applying container");
                object.retain(|field, _| field != "@type");
                object.insert("@container".to_string(), json!(container));
            }
        }

        Ok(baseline)
    }
}
