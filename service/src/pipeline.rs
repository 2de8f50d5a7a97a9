//! End-to-end artifact pipelines
//!
//! Each pipeline loads its schema sources, runs the baseline generator and
//! the matching builder, and renders the complete artifact into a `String`.
//! Nothing is written anywhere until a pipeline has succeeded, so a failed
//! run produces no partial output.

use std::path::{Path, PathBuf};

use linkml_core::error::{LinkMLError, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::ArtifactConfig;
use crate::generator::{
    ContextBuilder, DocIndex, DocIndexBuilder, Generator, GeneratorOptions,
    JsonLdContextGenerator, JsonLdContextGeneratorConfig, TypeScriptGenerator, TypeTextRewriter,
};
use crate::schema_view::SchemaView;

/// Final JSON-LD context for one schema source, as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the context cannot be
/// generated.
pub fn context_artifact(schema: &Path, config: &ArtifactConfig) -> Result<String> {
    let view = SchemaView::load(schema)?;

    let generator = JsonLdContextGenerator::new(JsonLdContextGeneratorConfig {
        base_uri: config.context.base_uri.clone(),
        features: config.context.features,
    });
    let baseline = generator.generate_document(&view)?;
    let context = ContextBuilder::new(&view)
        .with_version(config.context.version)
        .build_for_view(baseline)?;

    info!(schema = %schema.display(), "built JSON-LD context");
    render_json(&context)
}

/// Schema source files directly inside `dir`, sorted by file name
///
/// # Errors
///
/// Returns `LinkMLError::InvalidInput` if `dir` is not a directory and an
/// error if it cannot be listed.
pub fn schema_sources(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LinkMLError::invalid_input(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            LinkMLError::other_with_source(format!("failed to list '{}'", dir.display()), e)
        })?;
        let matches = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext));
        if matches {
            sources.push(entry.into_path());
        }
    }

    debug!(dir = %dir.display(), count = sources.len(), "found schema sources");
    Ok(sources)
}

/// Aggregate the documentation of every schema source in `dir`
///
/// # Errors
///
/// See [`schema_sources`]; also fails if any source cannot be loaded.
pub fn build_doc_index(dir: &Path, config: &ArtifactConfig) -> Result<DocIndex> {
    let mut builder = DocIndexBuilder::with_excluded_classes(config.docs.excluded_classes.iter().cloned());
    for source in schema_sources(dir, &config.docs.schema_extensions)? {
        let view = SchemaView::load(&source)?;
        builder.add_source(&view)?;
    }
    Ok(builder.finalize())
}

/// Documentation index for a schema directory, as pretty-printed JSON
///
/// # Errors
///
/// See [`build_doc_index`].
pub fn doc_index_artifact(dir: &Path, config: &ArtifactConfig) -> Result<String> {
    let index = build_doc_index(dir, config)?;
    info!(
        classes = index.classes.len(),
        slots = index.slots.len(),
        "built documentation index"
    );
    render_json(&index)
}

/// TypeScript declarations for one schema source with internationalized
/// text rewritten
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the declarations
/// cannot be generated.
pub fn typescript_artifact(schema: &Path, config: &ArtifactConfig) -> Result<String> {
    let view = SchemaView::load(schema)?;

    let options = GeneratorOptions::new().with_docs(config.typescript.include_docs);
    let baseline = TypeScriptGenerator::with_options(options).generate(&view)?;
    let output = TypeTextRewriter::with_settings(&view, config.i18n.clone()).rewrite(&baseline)?;

    info!(schema = %schema.display(), "built TypeScript declarations");
    Ok(output)
}

fn render_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_schema_sources_sorted_and_filtered() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("b.yaml"), "name: b\n")?;
        fs::write(dir.path().join("a.yml"), "name: a\n")?;
        fs::write(dir.path().join("notes.txt"), "not a schema\n")?;
        fs::create_dir(dir.path().join("nested.yaml"))?;

        let sources = schema_sources(dir.path(), &ArtifactConfig::default().docs.schema_extensions)?;
        let names: Vec<_> = sources
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yaml"]);
        Ok(())
    }

    #[test]
    fn test_file_is_not_a_schema_dir() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("schema.yaml");
        fs::write(&file, "name: x\n")?;

        let result = doc_index_artifact(&file, &ArtifactConfig::default());
        assert!(matches!(result, Err(LinkMLError::InvalidInput(_))));
        Ok(())
    }

    #[test]
    fn test_bad_schema_fails_whole_run() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("a.yaml"), "name: a\nclasses:\n  A:\n")?;
        fs::write(dir.path().join("b.yaml"), "classes: [unclosed\n")?;

        assert!(doc_index_artifact(dir.path(), &ArtifactConfig::default()).is_err());
        Ok(())
    }
}
