//! Base functionality shared by the generators

/// Common type mappings for the generated artifacts
pub struct TypeMapper;

impl TypeMapper {
    /// Map `LinkML` type to TypeScript type
    #[must_use]
    pub fn to_typescript(linkml_type: &str) -> &'static str {
        match linkml_type {
            "string" | "str" | "uri" | "uriorcurie" | "curie" | "ncname" | "date" | "datetime"
            | "time" => "string",
            "integer" | "int" | "float" | "double" | "decimal" => "number",
            "boolean" | "bool" => "boolean",
            _ => "unknown",
        }
    }

    /// Map `LinkML` type to a JSON-LD `@type` coercion
    #[must_use]
    pub fn to_xsd(linkml_type: &str) -> Option<&'static str> {
        match linkml_type {
            "integer" | "int" => Some("xsd:integer"),
            "float" => Some("xsd:float"),
            "double" => Some("xsd:double"),
            "decimal" => Some("xsd:decimal"),
            "boolean" | "bool" => Some("xsd:boolean"),
            "date" => Some("xsd:date"),
            "datetime" => Some("xsd:dateTime"),
            "time" => Some("xsd:time"),
            "uri" | "uriorcurie" => Some("@id"),
            _ => None,
        }
    }
}

/// Base code formatter with common functionality
pub struct BaseCodeFormatter;

impl BaseCodeFormatter {
    /// Wrap text to a specific line width
    #[must_use]
    pub fn wrap_text(text: &str, width: usize, indent: &str) -> String {
        let mut lines = Vec::new();
        let mut current_line = String::new();

        for word in text.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.len() + 1 + word.len() <= width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current_line));
                current_line = word.to_string();
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }

        lines.join(&format!("\n{indent}"))
    }
}
