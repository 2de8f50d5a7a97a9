//! JSON-LD Context generator for `LinkML` schemas
//!
//! Produces the baseline `@context`: prefixes, `@vocab`, one `@id` entry per
//! class and one object entry per slot or attribute. Annotation-driven
//! rewrites happen afterwards in [`crate::generator::context_builder`].

use bitflags::bitflags;
use linkml_core::types::SlotDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::base::TypeMapper;
use super::traits::{Generator, GeneratorError, GeneratorOptions, GeneratorResult};
use crate::schema_view::SchemaView;

bitflags! {
    /// Feature flags for JSON-LD context generation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct JsonLdFeatures: u8 {
        /// Include type coercion in context
        const TYPE_COERCION = 1 << 0;
        /// Use compact IRIs (CURIEs)
        const USE_CURIES = 1 << 1;
        /// Emit `@container` for multivalued slots
        const CONTAINERS = 1 << 2;

        /// Default feature set for typical usage
        const DEFAULT = Self::TYPE_COERCION.bits() | Self::USE_CURIES.bits();
    }
}

impl Default for JsonLdFeatures {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Keywords a slot name may not shadow
const JSONLD_KEYWORDS: [&str; 8] = [
    "@context",
    "@id",
    "@type",
    "@value",
    "@language",
    "@index",
    "@reverse",
    "@graph",
];

/// `JSON`-LD Context generator configuration
#[derive(Debug, Clone, Default)]
pub struct JsonLdContextGeneratorConfig {
    /// Base URI for the schema
    pub base_uri: Option<String>,
    /// Feature flags controlling context generation
    pub features: JsonLdFeatures,
}

/// `JSON`-LD Context generator
#[derive(Default)]
pub struct JsonLdContextGenerator {
    config: JsonLdContextGeneratorConfig,
    /// Additional generator options for customization
    options: GeneratorOptions,
}

impl JsonLdContextGenerator {
    /// Create a new `JSON`-LD Context generator
    #[must_use]
    pub fn new(config: JsonLdContextGeneratorConfig) -> Self {
        Self {
            config,
            options: GeneratorOptions::default(),
        }
    }

    /// Create generator with custom options
    #[must_use]
    pub fn with_options(config: JsonLdContextGeneratorConfig, options: GeneratorOptions) -> Self {
        Self { config, options }
    }

    fn feature(&self, option: &str, flag: JsonLdFeatures) -> bool {
        self.options
            .custom_flag(option, self.config.features.contains(flag))
    }

    /// Generate the full `{"@context": ...}` document
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Validation` if a slot name is empty or
    /// collides with a JSON-LD keyword.
    pub fn generate_document(&self, view: &SchemaView) -> GeneratorResult<Value> {
        self.validate_schema(view.schema())?;
        let context = self.generate_context(view)?;
        Ok(json!({ "@context": context }))
    }

    /// Generate the context object
    fn generate_context(&self, view: &SchemaView) -> GeneratorResult<Value> {
        let schema = view.schema();
        let mut context = Map::new();

        if let Some(base) = self
            .options
            .get_custom("base_uri")
            .or(self.config.base_uri.as_ref())
        {
            context.insert("@base".to_string(), json!(base));
        }

        for (prefix, expansion) in &schema.prefixes {
            if let Some(reference) = expansion.reference() {
                context.insert(prefix.clone(), json!(reference));
            }
        }

        if let Some(default_prefix) = &schema.default_prefix
            && let Some(reference) = schema
                .prefixes
                .get(default_prefix)
                .and_then(|p| p.reference())
        {
            context.insert("@vocab".to_string(), json!(reference));
        }

        for class in view.all_classes().values() {
            if let Some(uri) = view.class_uri(class) {
                context.insert(class.name.clone(), json!({ "@id": self.iri(view, &uri) }));
            }
        }

        let mut uses_xsd = false;
        for (slot_name, slot) in view.all_slots_with_attributes() {
            let entry = self.slot_entry(view, &slot_name, &slot)?;
            uses_xsd |= entry
                .get("@type")
                .and_then(Value::as_str)
                .is_some_and(|t| t.starts_with("xsd:"));
            context.insert(slot_name, Value::Object(entry));
        }

        if uses_xsd && !context.contains_key("xsd") {
            context.insert(
                "xsd".to_string(),
                json!("http://www.w3.org/2001/XMLSchema#"),
            );
        }

        Ok(Value::Object(context))
    }

    /// Build the object entry of one slot
    fn slot_entry(
        &self,
        view: &SchemaView,
        slot_name: &str,
        slot: &SlotDefinition,
    ) -> GeneratorResult<Map<String, Value>> {
        if slot_name.trim().is_empty() {
            return Err(GeneratorError::Validation(
                "Slot name cannot be empty".to_string(),
            ));
        }
        if JSONLD_KEYWORDS.contains(&slot_name) {
            return Err(GeneratorError::Validation(format!(
                "Slot name '{slot_name}' conflicts with JSON-LD keyword"
            )));
        }

        let mut entry = Map::new();
        if let Some(uri) = view.slot_uri(slot) {
            entry.insert("@id".to_string(), json!(self.iri(view, &uri)));
        }

        if self.feature("include_type_coercion", JsonLdFeatures::TYPE_COERCION)
            && let Some(coercion) = Self::type_coercion(view, slot)
        {
            entry.insert("@type".to_string(), json!(coercion));
        }

        if self.feature("include_containers", JsonLdFeatures::CONTAINERS)
            && slot.multivalued == Some(true)
        {
            let container = self
                .options
                .get_custom("multivalued_container")
                .map_or("@set", String::as_str);
            entry.insert("@container".to_string(), json!(container));
        }

        Ok(entry)
    }

    /// `@id` for class ranges, `xsd:*` for primitives and types derived from them
    fn type_coercion(view: &SchemaView, slot: &SlotDefinition) -> Option<&'static str> {
        let range = slot
            .range
            .as_deref()
            .or(view.schema().default_range.as_deref())?;

        if view.get_class(range).is_some() {
            return Some("@id");
        }
        if view.get_enum(range).is_some() {
            return None;
        }

        // follow `typeof` to a primitive, bounded by the number of types
        let mut current = range;
        for _ in 0..=view.all_types().len() {
            match view.get_type(current).and_then(|t| t.base_type.as_deref()) {
                Some(base) => current = base,
                None => break,
            }
        }
        TypeMapper::to_xsd(current)
    }

    /// CURIE or expanded IRI, depending on the `USE_CURIES` feature
    fn iri(&self, view: &SchemaView, uri: &str) -> String {
        if self.feature("use_curies", JsonLdFeatures::USE_CURIES) {
            uri.to_string()
        } else {
            view.expand_curie(uri)
        }
    }
}

impl Generator for JsonLdContextGenerator {
    fn name(&self) -> &'static str {
        "jsonld-context"
    }

    fn generate(&self, view: &SchemaView) -> GeneratorResult<String> {
        let document = self.generate_document(view)?;
        serde_json::to_string_pretty(&document).map_err(|e| {
            GeneratorError::Generation(format!("Failed to serialize JSON-LD context: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkml_core::types::{ClassDefinition, PrefixDefinition, SchemaDefinition, TypeDefinition};
    use pretty_assertions::assert_eq;

    fn schema() -> SchemaDefinition {
        let mut schema = SchemaDefinition {
            id: "https://example.com/test".to_string(),
            default_prefix: Some("ex".to_string()),
            ..SchemaDefinition::new("TestSchema")
        };
        schema.prefixes.insert(
            "ex".to_string(),
            PrefixDefinition::Simple("https://example.com/".to_string()),
        );
        schema.prefixes.insert(
            "schema".to_string(),
            PrefixDefinition::Simple("https://schema.org/".to_string()),
        );

        let person = ClassDefinition {
            description: Some("A person".to_string()),
            slots: vec!["name".to_string(), "age".to_string(), "friends".to_string()],
            ..ClassDefinition::new("Person")
        };
        schema.classes.insert("Person".to_string(), person);

        schema.types.insert(
            "Age".to_string(),
            TypeDefinition {
                base_type: Some("integer".to_string()),
                ..Default::default()
            },
        );

        for slot in [
            SlotDefinition {
                range: Some("string".to_string()),
                slot_uri: Some("schema:name".to_string()),
                ..SlotDefinition::new("name")
            },
            SlotDefinition {
                range: Some("Age".to_string()),
                ..SlotDefinition::new("age")
            },
            SlotDefinition {
                range: Some("Person".to_string()),
                multivalued: Some(true),
                ..SlotDefinition::new("friends")
            },
        ] {
            schema.slots.insert(slot.name.clone(), slot);
        }
        schema
    }

    #[test]
    fn test_jsonld_context_generation() -> anyhow::Result<()> {
        let view = SchemaView::new(schema())?;
        let document = JsonLdContextGenerator::default().generate_document(&view)?;
        let ctx = &document["@context"];

        assert_eq!(ctx["ex"], json!("https://example.com/"));
        assert_eq!(ctx["@vocab"], json!("https://example.com/"));
        assert_eq!(ctx["Person"], json!({"@id": "ex:Person"}));
        assert_eq!(ctx["name"], json!({"@id": "schema:name"}));
        assert_eq!(ctx["age"], json!({"@id": "ex:age", "@type": "xsd:integer"}));
        assert_eq!(ctx["friends"], json!({"@id": "ex:friends", "@type": "@id"}));
        assert_eq!(ctx["xsd"], json!("http://www.w3.org/2001/XMLSchema#"));
        Ok(())
    }

    #[test]
    fn test_feature_flags() -> anyhow::Result<()> {
        let view = SchemaView::new(schema())?;
        let config = JsonLdContextGeneratorConfig {
            features: JsonLdFeatures::CONTAINERS,
            ..Default::default()
        };
        let document = JsonLdContextGenerator::new(config).generate_document(&view)?;
        let ctx = &document["@context"];

        assert_eq!(
            ctx["friends"],
            json!({"@id": "https://example.com/friends", "@container": "@set"})
        );
        assert_eq!(ctx["age"], json!({"@id": "https://example.com/age"}));
        assert!(ctx.get("xsd").is_none());
        Ok(())
    }

    #[test]
    fn test_custom_options_override_features() -> anyhow::Result<()> {
        let view = SchemaView::new(schema())?;
        let mut options = GeneratorOptions::new();
        for (key, value) in [
            ("include_containers", "true"),
            ("multivalued_container", "@list"),
            ("base_uri", "https://example.com/data/"),
        ] {
            options.custom.insert(key.to_string(), value.to_string());
        }
        let generator =
            JsonLdContextGenerator::with_options(JsonLdContextGeneratorConfig::default(), options);
        let document = generator.generate_document(&view)?;
        let ctx = &document["@context"];

        assert_eq!(ctx["@base"], json!("https://example.com/data/"));
        assert_eq!(
            ctx["friends"],
            json!({"@id": "ex:friends", "@type": "@id", "@container": "@list"})
        );
        Ok(())
    }

    #[test]
    fn test_keyword_slot_rejected() -> anyhow::Result<()> {
        let mut schema = schema();
        schema
            .slots
            .insert("@type".to_string(), SlotDefinition::new("@type"));
        let view = SchemaView::new(schema)?;

        let result = JsonLdContextGenerator::default().generate(&view);
        assert!(matches!(result, Err(GeneratorError::Validation(_))));
        Ok(())
    }
}
