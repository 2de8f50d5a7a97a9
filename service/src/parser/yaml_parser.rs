//! YAML parser for `LinkML` schemas

use linkml_core::{
    error::{LinkMLError, Result},
    types::SchemaDefinition,
};
use std::fs;
use std::path::Path;

use super::{SchemaParser, with_file_context};

/// `YAML` parser implementation
#[derive(Default)]
pub struct YamlParser;

impl YamlParser {
    /// Create a new `YAML` parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SchemaParser for YamlParser {
    fn parse_str(&self, content: &str) -> Result<SchemaDefinition> {
        serde_yaml::from_str(content).map_err(|e| {
            LinkMLError::parse_at(
                format!("YAML parsing error: {e}"),
                e.location().map_or_else(
                    || "unknown location".to_string(),
                    |l| format!("line {}, column {}", l.line(), l.column()),
                ),
            )
        })
    }

    fn parse_file(&self, path: &Path) -> Result<SchemaDefinition> {
        let content = fs::read_to_string(path).map_err(LinkMLError::IoError)?;
        self.parse_str(&content)
            .map_err(|e| with_file_context(e, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkml_core::Annotatable;

    #[test]
    fn test_parse_minimal_schema() -> linkml_core::Result<()> {
        let yaml = r"
id: https://example.org/test
name: test_schema
";

        let parser = YamlParser::new();
        let schema = parser.parse_str(yaml)?;

        assert_eq!(schema.id, "https://example.org/test");
        assert_eq!(schema.name, "test_schema");
        Ok(())
    }

    #[test]
    fn test_parse_schema_with_classes_and_annotations() -> linkml_core::Result<()> {
        let yaml = r"
id: https://example.org/test
name: test_schema
classes:
  Person:
    description: A human being
    slots:
      - name
      - labels
slots:
  name:
    range: string
  labels:
    range: I18NString
    annotations:
      jsonld_container:
        tag: jsonld_container
        value: '@language'
";

        let parser = YamlParser::new();
        let schema = parser.parse_str(yaml)?;

        assert_eq!(schema.classes["Person"].slots.len(), 2);
        assert_eq!(schema.slots["name"].name, "name");
        assert_eq!(
            schema.slots["labels"]
                .annotation_text("jsonld_container")
                .as_deref(),
            Some("@language")
        );
        Ok(())
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let yaml = "invalid: yaml: content:";

        let parser = YamlParser::new();
        let result = parser.parse_str(yaml);

        if let Err(LinkMLError::ParseError { message, location }) = result {
            assert!(message.contains("YAML parsing error"));
            assert!(location.is_some());
        } else {
            panic!("Expected ParseError");
        }
    }
}
