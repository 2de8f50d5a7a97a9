//! Schema parsing module
//!
//! This module handles parsing `LinkML` schemas from YAML and JSON formats and
//! resolving their local imports into a single merged schema.

use linkml_core::{
    error::{LinkMLError, Result},
    types::SchemaDefinition,
};
use std::path::Path;

pub mod import_resolver;
pub mod json_parser;
pub mod yaml_parser;

pub use import_resolver::ImportResolver;
pub use json_parser::JsonParser;
pub use yaml_parser::YamlParser;

/// Trait for schema parsers
pub trait SchemaParser: Send + Sync {
    /// Parse schema from string content
    ///
    /// # Errors
    ///
    /// Returns a `LinkMLError` if parsing fails
    fn parse_str(&self, content: &str) -> Result<SchemaDefinition>;

    /// Parse schema from file
    ///
    /// # Errors
    ///
    /// Returns a `LinkMLError` if:
    /// - File cannot be read
    /// - Parsing fails
    fn parse_file(&self, path: &Path) -> Result<SchemaDefinition>;
}

/// Main parser that delegates to format-specific parsers
pub struct Parser {
    yaml: YamlParser,
    json: JsonParser,
    /// Whether to automatically resolve imports
    auto_resolve_imports: bool,
}

impl Parser {
    /// Create a new parser
    #[must_use]
    pub fn new() -> Self {
        Self {
            yaml: YamlParser::new(),
            json: JsonParser::new(),
            auto_resolve_imports: false,
        }
    }

    /// Create a parser that automatically resolves imports
    #[must_use]
    pub fn with_import_resolution() -> Self {
        Self {
            auto_resolve_imports: true,
            ..Self::new()
        }
    }

    /// Parse schema from file, detecting format from extension
    ///
    /// # Errors
    ///
    /// Returns a `LinkMLError` if:
    /// - File has no extension
    /// - File format is not supported
    /// - Parsing fails
    /// - An import cannot be resolved (when import resolution is enabled)
    pub fn parse_file(&self, path: &Path) -> Result<SchemaDefinition> {
        let extension = path.extension().and_then(|s| s.to_str()).ok_or_else(|| {
            LinkMLError::parse(format!("No file extension found: {}", path.display()))
        })?;

        let schema = match extension {
            "yaml" | "yml" => self.yaml.parse_file(path)?,
            "json" => self.json.parse_file(path)?,
            _ => {
                return Err(LinkMLError::parse(format!(
                    "Unsupported file format: {extension}"
                )));
            }
        };

        if self.auto_resolve_imports && !schema.imports.is_empty() {
            ImportResolver::new().resolve(schema, path)
        } else {
            Ok(schema)
        }
    }

    /// Parse schema from string with specified format
    ///
    /// # Errors
    ///
    /// Returns a `LinkMLError` if:
    /// - Format is not supported
    /// - Parsing fails
    pub fn parse_str(&self, content: &str, format: &str) -> Result<SchemaDefinition> {
        match format {
            "yaml" | "yml" => self.yaml.parse_str(content),
            "json" => self.json.parse_str(content),
            _ => Err(LinkMLError::parse(format!("Unsupported format: {format}"))),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach the file path to a parse error coming out of `parse_str`
pub(crate) fn with_file_context(err: LinkMLError, path: &Path) -> LinkMLError {
    match err {
        LinkMLError::ParseError { message, location } => LinkMLError::ParseError {
            message: format!("{message} in file {}", path.display()),
            location,
        },
        other => other,
    }
}
