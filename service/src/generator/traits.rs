//! Core generator traits and types
//!
//! This module defines the traits and types shared by the baseline generators.

use linkml_core::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

use crate::schema_view::SchemaView;

/// Result type for generator operations
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur during code generation
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Schema validation error
    #[error("Schema validation failed: {0}")]
    Validation(String),

    /// Code generation error
    #[error("Code generation failed: {0}")]
    Generation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `LinkML` core error
    #[error("LinkML error: {0}")]
    LinkML(#[from] LinkMLError),
}

impl From<std::fmt::Error> for GeneratorError {
    fn from(err: std::fmt::Error) -> Self {
        GeneratorError::Generation(format!("formatting failed: {err}"))
    }
}

impl From<GeneratorError> for LinkMLError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::LinkML(inner) => inner,
            GeneratorError::Io(io) => LinkMLError::IoError(io),
            GeneratorError::Validation(message) => LinkMLError::schema_validation(message),
            GeneratorError::Generation(message) => LinkMLError::other(message),
        }
    }
}

/// Options for code generation
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Include documentation in generated code
    pub include_docs: bool,

    /// Custom options for specific generators
    pub custom: HashMap<String, String>,
}

impl GeneratorOptions {
    /// Create new generator options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include documentation
    #[must_use]
    pub fn with_docs(mut self, include_docs: bool) -> Self {
        self.include_docs = include_docs;
        self
    }

    /// Get a custom option
    #[must_use]
    pub fn get_custom(&self, key: &str) -> Option<&String> {
        self.custom.get(key)
    }

    /// Read a boolean custom option, falling back to `default` when unset
    #[must_use]
    pub fn custom_flag(&self, key: &str, default: bool) -> bool {
        self.custom.get(key).map_or(default, |v| v == "true")
    }
}

/// Core trait for baseline artifact generators
pub trait Generator: Send + Sync {
    /// Get generator name
    fn name(&self) -> &str;

    /// Generate the artifact text for a schema
    ///
    /// # Errors
    /// Returns an error if the schema is invalid or generation fails
    fn generate(&self, view: &SchemaView) -> GeneratorResult<String>;

    /// Validate schema before generation
    ///
    /// # Errors
    /// Returns an error if the schema validation fails
    fn validate_schema(&self, schema: &SchemaDefinition) -> GeneratorResult<()> {
        if schema.name.is_empty() && schema.id.is_empty() {
            return Err(GeneratorError::Validation(format!(
                "schema needs a name or id for {} generation",
                self.name()
            )));
        }
        Ok(())
    }
}
