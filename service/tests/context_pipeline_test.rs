//! End-to-end tests for the JSON-LD context pipeline

use std::fs;
use std::path::PathBuf;

use linkml_artifacts::config::ArtifactConfig;
use linkml_artifacts::generator::{ContextBuilder, JsonLdContextGenerator, JsonLdContextGeneratorConfig, JsonLdFeatures};
use linkml_artifacts::pipeline;
use linkml_artifacts::schema_view::SchemaView;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const SCHEMA: &str = r"
id: https://example.org/heritage
name: heritage
default_prefix: ex
prefixes:
  ex: https://example.org/heritage/
  owl: http://www.w3.org/2002/07/owl#
imports:
  - linkml:types
classes:
  Concept:
    annotations:
      jsonld_container: '@set'
  Work:
    slots: [title, subjects, keywords, same_as, year]
slots:
  title:
    range: string
    annotations:
      jsonld_container: '@language'
  subjects:
    range: Concept
    multivalued: true
  keywords:
    range: Concept
    annotations:
      jsonld_container: '@list'
  same_as:
    range: Work
    annotations:
      jsonld_id: owl:sameAs
      jsonld_container: '@set'
  year:
    range: integer
";

fn write_schema(dir: &TempDir) -> anyhow::Result<PathBuf> {
    let path = dir.path().join("heritage.yaml");
    fs::write(&path, SCHEMA)?;
    Ok(path)
}

#[test]
fn test_context_artifact() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_schema(&dir)?;

    let output = pipeline::context_artifact(&path, &ArtifactConfig::default())?;
    assert!(output.ends_with("}\n"));
    let document: Value = serde_json::from_str(&output)?;

    assert_eq!(
        document,
        json!({
            "@context": {
                "ex": "https://example.org/heritage/",
                "owl": "http://www.w3.org/2002/07/owl#",
                "@vocab": "https://example.org/heritage/",
                "Concept": {"@id": "ex:Concept"},
                "Work": {"@id": "ex:Work"},
                "title": {"@id": "ex:title", "@container": "@language"},
                "subjects": {"@id": "ex:subjects", "@container": "@set"},
                "keywords": {"@id": "ex:keywords", "@container": "@list"},
                "same_as": "owl:sameAs",
                "year": {"@id": "ex:year", "@type": "xsd:integer"},
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "@version": 1.1
            }
        })
    );
    Ok(())
}

#[test]
fn test_slot_container_overrides_range_class_container() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let view = SchemaView::load(write_schema(&dir)?)?;

    let baseline = JsonLdContextGenerator::default().generate_document(&view)?;
    let context = ContextBuilder::new(&view).build_for_view(baseline)?;

    assert_eq!(context["@context"]["keywords"]["@container"], json!("@list"));
    assert_eq!(context["@context"]["subjects"]["@container"], json!("@set"));
    Ok(())
}

#[test]
fn test_id_override_has_no_container_or_type() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let view = SchemaView::load(write_schema(&dir)?)?;

    let generator = JsonLdContextGenerator::new(JsonLdContextGeneratorConfig {
        base_uri: None,
        features: JsonLdFeatures::all(),
    });
    let context = ContextBuilder::new(&view).build_for_view(generator.generate_document(&view)?)?;

    let entry = &context["@context"]["same_as"];
    assert_eq!(entry, &json!("owl:sameAs"));
    assert!(entry.get("@container").is_none());
    assert!(entry.get("@type").is_none());
    Ok(())
}

#[test]
fn test_configured_version_and_features() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_schema(&dir)?;

    let mut config = ArtifactConfig::default();
    config.context.version = 1.0;
    config.context.features = JsonLdFeatures::TYPE_COERCION;
    config.context.base_uri = Some("https://example.org/data/".to_string());

    let document: Value = serde_json::from_str(&pipeline::context_artifact(&path, &config)?)?;
    let context = &document["@context"];

    assert_eq!(context["@version"], json!(1.0));
    assert_eq!(context["@base"], json!("https://example.org/data/"));
    assert_eq!(
        context["year"],
        json!({"@id": "https://example.org/heritage/year", "@type": "xsd:integer"})
    );
    Ok(())
}

#[test]
fn test_unreadable_schema_is_an_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "classes: [unclosed\n")?;

    assert!(pipeline::context_artifact(&path, &ArtifactConfig::default()).is_err());
    assert!(pipeline::context_artifact(&dir.path().join("missing.yaml"), &ArtifactConfig::default()).is_err());
    Ok(())
}
