//! Configuration loading for artifact generation
//!
//! This module provides configuration loading from YAML files with
//! environment variable substitution support. Every field has a default, so
//! an empty file (or no file at all) yields the stock behaviour.

pub mod validation;

use linkml_core::{LinkMLError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::sync::LazyLock;

use crate::generator::jsonld_context::JsonLdFeatures;

static ENV_VAR_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([^}:]+)(?::(-)?([^}]*))?\}").expect("valid env var pattern")
});

/// Load configuration from `YAML` file with environment variable substitution
///
/// # Errors
///
/// Returns `LinkMLError::IoError` if the file cannot be read
/// Returns `LinkMLError::ConfigError` if the YAML cannot be parsed
pub fn load_config<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(LinkMLError::IoError)?;
    let substituted = substitute_env_vars(&contents);

    serde_yaml::from_str(&substituted)
        .map_err(|e| LinkMLError::ConfigError(format!("Failed to parse YAML config: {e}")))
}

/// Substitute environment variables in the format ${VAR:-default}
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(3).map_or("", |m| m.as_str());

            env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .to_string()
}

/// Complete artifact generation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Internationalized string handling
    pub i18n: I18nConfig,
    /// JSON-LD context output
    pub context: ContextConfig,
    /// Documentation index output
    pub docs: DocsConfig,
    /// TypeScript output
    pub typescript: TypeScriptConfig,
}

impl ArtifactConfig {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// is out of range
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = load_config(path)?;
        validation::validate_values(&config)?;
        Ok(config)
    }
}

/// Internationalized string configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Name of the internationalized string type in the schema
    pub type_name: String,
    /// TypeScript type the internationalized string collapses to
    pub map_type: String,
    /// `jsonld_container` value marking language-tagged text
    pub language_marker: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            type_name: "I18NString".to_string(),
            map_type: "Record<string, string | string[]>".to_string(),
            language_marker: "@language".to_string(),
        }
    }
}

/// JSON-LD context configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Value written to `@version`
    pub version: f64,
    /// Baseline generator features
    pub features: JsonLdFeatures,
    /// Optional `@base`
    pub base_uri: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            version: crate::generator::context_builder::DEFAULT_CONTEXT_VERSION,
            features: JsonLdFeatures::DEFAULT,
            base_uri: None,
        }
    }
}

/// Documentation index configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Class names never indexed
    pub excluded_classes: Vec<String>,
    /// File extensions treated as schema sources in a directory
    pub schema_extensions: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            excluded_classes: crate::generator::doc_index::DEFAULT_EXCLUDED_CLASSES
                .iter()
                .map(ToString::to_string)
                .collect(),
            schema_extensions: vec!["yaml".to_string(), "yml".to_string()],
        }
    }
}

/// TypeScript output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeScriptConfig {
    /// Emit JSDoc comments from descriptions
    pub include_docs: bool,
}

impl Default for TypeScriptConfig {
    fn default() -> Self {
        Self { include_docs: true }
    }
}
