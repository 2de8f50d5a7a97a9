//! Documentation index aggregation across schema sources

use std::fs;

use linkml_artifacts::config::ArtifactConfig;
use linkml_artifacts::generator::DocIndex;
use linkml_artifacts::pipeline;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const CORE: &str = r"
id: https://example.org/core
name: core
default_prefix: core
prefixes:
  core: https://example.org/core/
classes:
  Entity:
    abstract: true
    slots: [id, name]
    slot_usage:
      id:
        identifier: true
  Agent:
    is_a: Entity
    description: Someone who acts
slots:
  id:
    range: string
  name:
    description: Display name
    range: string
";

const EXTENSION: &str = r"
id: https://example.org/ext
name: ext
default_prefix: ext
prefixes:
  ext: https://example.org/ext/
imports:
  - core
classes:
  Agent:
    description: A redefined agent
    slots: [email]
  Organisation:
    is_a: Entity
    slots: [members]
    slot_usage:
      name:
        required: true
slots:
  email:
    range: string
  members:
    range: Agent
    multivalued: true
    inlined_as_list: true
  homepage:
    description: Web page
";

fn build(sources: &[(&str, &str)]) -> anyhow::Result<DocIndex> {
    let dir = TempDir::new()?;
    for (file, content) in sources {
        fs::write(dir.path().join(file), content)?;
    }
    Ok(pipeline::build_doc_index(dir.path(), &ArtifactConfig::default())?)
}

#[test]
fn test_zero_sources_give_empty_index() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let output = pipeline::doc_index_artifact(dir.path(), &ArtifactConfig::default())?;
    let value: Value = serde_json::from_str(&output)?;

    assert_eq!(value, json!({"classes": {}, "slots": {}}));
    Ok(())
}

#[test]
fn test_duplicate_class_taken_from_first_source() -> anyhow::Result<()> {
    let index = build(&[("core.yaml", CORE), ("ext.yaml", EXTENSION)])?;

    let class_names: Vec<_> = index.classes.keys().map(String::as_str).collect();
    assert_eq!(class_names, vec!["Entity", "Agent", "Organisation"]);

    let agent = &index.classes["Agent"];
    assert_eq!(agent.description.as_deref(), Some("Someone who acts"));
    assert_eq!(agent.class_uri.as_deref(), Some("core:Agent"));
    let agent_slots: Vec<_> = agent.slots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(agent_slots, vec!["id", "name"]);

    let agent_usages = index.slots["name"]
        .usages
        .iter()
        .filter(|usage| usage.class_name == "Agent")
        .count();
    assert_eq!(agent_usages, 1);
    assert!(!index.slots.contains_key("email") || index.slots["email"].usages.is_empty());
    Ok(())
}

#[test]
fn test_source_order_decides_owner() -> anyhow::Result<()> {
    let index = build(&[("a_ext.yaml", EXTENSION), ("core.yaml", CORE)])?;

    // the extension imports core, so it already sees Entity; its own Agent wins
    let agent = &index.classes["Agent"];
    assert_eq!(agent.description.as_deref(), Some("A redefined agent"));
    assert_eq!(agent.class_uri.as_deref(), Some("ext:Agent"));
    Ok(())
}

#[test]
fn test_usages_follow_class_specific_induction() -> anyhow::Result<()> {
    let index = build(&[("core.yaml", CORE), ("ext.yaml", EXTENSION)])?;

    let name = &index.slots["name"];
    assert_eq!(name.description.as_deref(), Some("Display name"));
    assert_eq!(name.required, None);
    let by_class: Vec<_> = name
        .usages
        .iter()
        .map(|usage| (usage.class_name.as_str(), usage.required))
        .collect();
    assert_eq!(
        by_class,
        vec![("Entity", None), ("Agent", None), ("Organisation", Some(true))]
    );

    let id_usage = &index.slots["id"].usages[0];
    assert_eq!(id_usage.required, Some(true));

    let members = &index.slots["members"];
    assert_eq!(members.inlined, Some(Some(true)));
    assert_eq!(members.usages[0].inlined_as_list, Some(true));
    Ok(())
}

#[test]
fn test_unused_schema_slots_get_minimal_entries() -> anyhow::Result<()> {
    let index = build(&[("core.yaml", CORE), ("ext.yaml", EXTENSION)])?;

    let homepage = &index.slots["homepage"];
    assert_eq!(homepage.description.as_deref(), Some("Web page"));
    assert_eq!(homepage.slot_uri.as_deref(), Some("ext:homepage"));
    assert!(homepage.usages.is_empty());
    assert_eq!(homepage.inlined, None);

    let value = serde_json::to_value(homepage)?;
    assert_eq!(value["usages"], json!([]));
    assert!(value.get("inlined").is_none());
    assert!(value.get("inlined_as_list").is_some());
    Ok(())
}

#[test]
fn test_children_and_flags_serialized() -> anyhow::Result<()> {
    let index = build(&[("core.yaml", CORE)])?;
    let value = serde_json::to_value(&index)?;

    assert_eq!(value["classes"]["Entity"]["abstract"], json!(true));
    assert_eq!(value["classes"]["Entity"]["children"], json!(["Agent"]));
    assert_eq!(value["classes"]["Agent"]["is_a"], json!("Entity"));
    assert_eq!(value["slots"]["id"]["usages"][0]["class"], json!("Entity"));
    Ok(())
}
