//! Last-mile rewrite of generated TypeScript for internationalized text
//!
//! The baseline generator knows nothing about language-tagged strings. This
//! pass runs over its output and
//! 1. collapses the declaration of the internationalized string type into a
//!    single map alias (or prepends that alias when the schema defines the
//!    type but the text does not declare it);
//! 2. finds the slots that hold internationalized text;
//! 3. retypes their property declarations to the alias;
//! 4. quotes property names of the form `prefix:local`.
//!
//! Every step is a best-effort text transform. A property whose type
//! expression cannot be located is left as generated and logged.

use std::ops::Range;
use std::sync::LazyLock;

use linkml_core::error::Result;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::annotation_resolver::AnnotationResolver;
use crate::config::I18nConfig;
use crate::schema_view::SchemaView;

static NAMESPACED_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\s,{}])([\w-]+:[\w-]+)(\??:)").expect("valid namespaced property pattern")
});

static COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*(?:[^*]|\*+[^*/])*\*+/|//[^\n]*").expect("valid comment pattern")
});

static DOC_COMMENT_BEFORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*\*(?:[^*]|\*+[^*/])*\*+/\s*$").expect("valid doc comment pattern")
});

/// A slot whose values are internationalized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nSlot {
    /// Property name as it appears in the declarations
    pub name: String,
    /// Whether the slot holds several values
    pub multivalued: bool,
}

/// Rewrites baseline TypeScript for internationalized strings
pub struct TypeTextRewriter<'a> {
    view: &'a SchemaView,
    settings: I18nConfig,
}

impl<'a> TypeTextRewriter<'a> {
    /// Create a rewriter with the default `I18NString` settings
    #[must_use]
    pub fn new(view: &'a SchemaView) -> Self {
        Self::with_settings(view, I18nConfig::default())
    }

    /// Create a rewriter with custom type name, map type and marker
    #[must_use]
    pub fn with_settings(view: &'a SchemaView, settings: I18nConfig) -> Self {
        Self { view, settings }
    }

    /// Run all four steps over `baseline`
    ///
    /// # Errors
    ///
    /// Returns `LinkMLError::ConfigError` if a configured name cannot be
    /// turned into a search pattern. Unmatched properties are not errors.
    pub fn rewrite(&self, baseline: &str) -> Result<String> {
        let unified = self.unify_i18n_type(baseline)?;
        let slots = self.classify_slots();
        let retyped = self.retype_properties(&unified, &slots)?;
        Ok(quote_namespaced_properties(&retyped))
    }

    fn alias_declaration(&self) -> String {
        format!(
            "export type {} = {};",
            self.settings.type_name, self.settings.map_type
        )
    }

    /// Replace every declaration of the internationalized string type,
    /// together with its doc comment, by the map alias
    ///
    /// # Errors
    ///
    /// Returns an error if the type name does not yield a valid pattern.
    pub fn unify_i18n_type(&self, text: &str) -> Result<String> {
        let header = Regex::new(&format!(
            r"export\s+(interface|type)\s+{}\b",
            regex::escape(&self.settings.type_name)
        ))?;
        let comments = comment_spans(text);

        let mut spans: Vec<Range<usize>> = Vec::new();
        let mut declared = false;
        for caps in header.captures_iter(text) {
            let Some(found) = caps.get(0) else { continue };
            if in_spans(&comments, found.start()) || spans.iter().any(|s| s.contains(&found.start())) {
                continue;
            }
            declared = true;
            let is_interface = caps.get(1).is_some_and(|kind| kind.as_str() == "interface");
            let Some(end) = declaration_end(text, &comments, found.end(), is_interface) else {
                warn!(type_name = %self.settings.type_name, "unterminated declaration; leaving it as generated");
                continue;
            };
            let start = DOC_COMMENT_BEFORE
                .find(&text[..found.start()])
                .map_or(found.start(), |doc| doc.start());
            spans.push(start..end);
        }

        let alias = self.alias_declaration();
        if !declared {
            let defined = self.view.get_type(&self.settings.type_name).is_some()
                || self.view.get_class(&self.settings.type_name).is_some();
            if defined {
                debug!(type_name = %self.settings.type_name, "prepending internationalized string alias");
                return Ok(format!("{alias}\n{text}"));
            }
            return Ok(text.to_string());
        }
        if spans.is_empty() {
            return Ok(text.to_string());
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in spans {
            output.push_str(&text[cursor..span.start]);
            output.push_str(&alias);
            cursor = span.end;
        }
        output.push_str(&text[cursor..]);
        Ok(output)
    }

    /// Slots holding internationalized text, longest name first
    #[must_use]
    pub fn classify_slots(&self) -> Vec<I18nSlot> {
        let resolver = AnnotationResolver::with_language_marker(self.view, &self.settings.language_marker);

        let mut slots: Vec<I18nSlot> = self
            .view
            .all_slots_with_attributes()
            .into_iter()
            .filter(|(_, slot)| {
                slot.range.as_deref() == Some(self.settings.type_name.as_str())
                    || resolver.is_language_tagged(slot)
            })
            .map(|(name, slot)| I18nSlot {
                name,
                multivalued: slot.multivalued == Some(true),
            })
            .collect();

        slots.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
        slots
    }

    /// Point the type of every property named after an internationalized
    /// slot at the alias
    ///
    /// # Errors
    ///
    /// Returns an error if a slot name does not yield a valid pattern.
    pub fn retype_properties(&self, text: &str, slots: &[I18nSlot]) -> Result<String> {
        let mut current = text.to_string();

        for slot in slots {
            let name = regex::escape(&slot.name);
            let property = Regex::new(&format!(r#"(?m)(?:^|[\s{{;,])((?:{name}|"{name}")\??:)"#))?;
            let comments = comment_spans(&current);

            let mut edits: Vec<Range<usize>> = Vec::new();
            for caps in property.captures_iter(&current) {
                let Some(key) = caps.get(1) else { continue };
                if in_spans(&comments, key.start()) || edits.iter().any(|e| e.contains(&key.start())) {
                    continue;
                }
                match expression_end(&current, &comments, key.end()) {
                    Some(end) if !current[key.end()..end].trim().is_empty() => {
                        let trimmed = current[key.end()..end].trim_end().len();
                        edits.push(key.end()..key.end() + trimmed);
                    }
                    _ => {
                        warn!(property = %slot.name, "could not locate type expression; leaving property as generated");
                    }
                }
            }

            if edits.is_empty() {
                continue;
            }
            debug!(
                property = %slot.name,
                multivalued = slot.multivalued,
                occurrences = edits.len(),
                "retyping internationalized property"
            );
            for edit in edits.into_iter().rev() {
                current.replace_range(edit, &format!(" {}", self.settings.type_name));
            }
        }

        Ok(current)
    }
}

/// Quote every `prefix:local` property name outside comments
#[must_use]
pub fn quote_namespaced_properties(text: &str) -> String {
    let comments = comment_spans(text);
    NAMESPACED_PROPERTY
        .replace_all(text, |caps: &Captures| {
            let inside_comment = caps.get(2).is_some_and(|name| in_spans(&comments, name.start()));
            if inside_comment {
                caps[0].to_string()
            } else {
                format!("{}\"{}\"{}", &caps[1], &caps[2], &caps[3])
            }
        })
        .into_owned()
}

fn comment_spans(text: &str) -> Vec<Range<usize>> {
    COMMENT.find_iter(text).map(|m| m.range()).collect()
}

fn in_spans(spans: &[Range<usize>], position: usize) -> bool {
    spans.iter().any(|span| span.contains(&position))
}

/// End of the comment starting exactly at `position`, if one does
fn comment_end_at(comments: &[Range<usize>], position: usize) -> Option<usize> {
    comments
        .iter()
        .find(|span| span.start == position)
        .map(|span| span.end)
}

/// Byte offset just past the end of a declaration whose header ends at `from`
///
/// Comments are skipped whole, so punctuation inside a doc comment never
/// counts as structure.
fn declaration_end(text: &str, comments: &[Range<usize>], from: usize, is_interface: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        if let Some(end) = comment_end_at(comments, i) {
            i = end;
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'{' | b'(' | b'[' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b'}' | b')' | b']' | b'>' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
                if depth == 0 && b == b'}' {
                    let line_rest = text[i + 1..].split('\n').next().unwrap_or("").trim();
                    if is_interface || line_rest.is_empty() || line_rest == ";" {
                        let semicolon = if line_rest == ";" {
                            text[i + 1..].find(';').map_or(0, |offset| offset + 1)
                        } else {
                            0
                        };
                        return Some(i + 1 + semicolon);
                    }
                }
            }
            b';' if depth == 0 => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Byte offset where the type expression starting at `from` stops
///
/// At nesting depth zero the expression ends before `;`, `,`, a line break
/// or the `}` closing the enclosing object type. Any other unbalanced closer,
/// or running off the end of the text, means the expression cannot be
/// located. Comments are skipped whole.
fn expression_end(text: &str, comments: &[Range<usize>], from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut seen_content = false;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        if let Some(end) = comment_end_at(comments, i) {
            i = end;
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'{' | b'(' | b'[' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b'}' if depth == 0 => return Some(i),
            b')' | b']' | b'>' if depth == 0 => return None,
            b'}' | b')' | b']' | b'>' => depth -= 1,
            b';' | b',' if depth == 0 => return Some(i),
            b'\n' if depth == 0 && seen_content => return Some(i),
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            seen_content = true;
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    const ALIAS: &str = "export type I18NString = Record<string, string | string[]>;";

    fn view(yaml: &str) -> Result<SchemaView> {
        SchemaView::new(Parser::new().parse_str(yaml, "yaml")?)
    }

    fn i18n_view() -> Result<SchemaView> {
        view(
            r"
id: https://example.org/test
name: test
types:
  I18NString:
    typeof: string
classes:
  LangText:
    annotations:
      jsonld_container: '@language'
  Thing:
    slots: [label, labelText, names, summary, code]
    attributes:
      caption:
        annotations:
          jsonld_container: '@language'
slots:
  label:
    range: I18NString
  labelText:
    range: string
    annotations:
      jsonld_container: '@language'
  names:
    range: I18NString
    multivalued: true
  summary:
    range: LangText
  code:
    range: string
",
        )
    }

    #[test]
    fn test_classify_longest_first() -> Result<()> {
        let view = i18n_view()?;
        let slots = TypeTextRewriter::new(&view).classify_slots();
        let names: Vec<_> = slots.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["labelText", "summary", "caption", "label", "names"]);
        assert!(slots.iter().any(|s| s.name == "names" && s.multivalued));
        assert!(!names.contains(&"code"));
        Ok(())
    }

    #[test]
    fn test_prefix_names_not_corrupted() -> Result<()> {
        let view = i18n_view()?;
        let text = "export interface Thing {\n  label?: string;\n  labelText: string;\n  code?: string;\n}\n";
        let output = TypeTextRewriter::new(&view).rewrite(text)?;

        assert_eq!(
            output,
            format!(
                "{ALIAS}\nexport interface Thing {{\n  label?: I18NString;\n  labelText: I18NString;\n  code?: string;\n}}\n"
            )
        );
        Ok(())
    }

    #[test]
    fn test_multivalued_keeps_markers() -> Result<()> {
        let view = i18n_view()?;
        let rewriter = TypeTextRewriter::new(&view);
        let slots = rewriter.classify_slots();

        let optional = rewriter.retype_properties("{\n  names?: string[];\n}", &slots)?;
        assert_eq!(optional, "{\n  names?: I18NString;\n}");
        let required = rewriter.retype_properties("{\n  names: string[];\n}", &slots)?;
        assert_eq!(required, "{\n  names: I18NString;\n}");
        Ok(())
    }

    #[test]
    fn test_declaration_replaced_with_doc_comment() -> Result<()> {
        let view = i18n_view()?;
        let text = "// header\n\n/**\n * Text in many languages\n */\nexport type I18NString = string;\n\nexport type Other = string;\n";
        let output = TypeTextRewriter::new(&view).unify_i18n_type(text)?;

        assert_eq!(output, format!("// header\n\n{ALIAS}\n\nexport type Other = string;\n"));
        Ok(())
    }

    #[test]
    fn test_interface_declaration_replaced() -> Result<()> {
        let view = i18n_view()?;
        let text = "export interface I18NString extends Base {\n  value?: string;\n  nested?: { a: string };\n}\n\nexport interface Next {\n}\n";
        let output = TypeTextRewriter::new(&view).unify_i18n_type(text)?;

        assert_eq!(output, format!("{ALIAS}\n\nexport interface Next {{\n}}\n"));
        Ok(())
    }

    #[test]
    fn test_prepends_alias_only_when_defined() -> Result<()> {
        let defined = i18n_view()?;
        let output = TypeTextRewriter::new(&defined).unify_i18n_type("export type A = string;\n")?;
        assert_eq!(output, format!("{ALIAS}\nexport type A = string;\n"));

        let undefined = view("name: plain\n")?;
        let output = TypeTextRewriter::new(&undefined).unify_i18n_type("export type A = string;\n")?;
        assert_eq!(output, "export type A = string;\n");
        Ok(())
    }

    #[test]
    fn test_namespaced_property_quoted() {
        let text = "export interface Place {\n  geo:hasGeometry?: Geometry[];\n  name: string;\n}\n";
        assert_eq!(
            quote_namespaced_properties(text),
            "export interface Place {\n  \"geo:hasGeometry\"?: Geometry[];\n  name: string;\n}\n"
        );
    }

    #[test]
    fn test_comments_left_alone() -> Result<()> {
        let view = i18n_view()?;
        let text = "/**\n * label: the thing's name, see ex:ref: docs\n */\nexport interface Thing {\n  label?: string;\n}\n";
        let output = TypeTextRewriter::new(&view).rewrite(text)?;

        assert!(output.contains(" * label: the thing's name, see ex:ref: docs\n"));
        assert!(output.contains("  label?: I18NString;\n"));
        Ok(())
    }

    #[test]
    fn test_unlocatable_expression_skipped() -> Result<()> {
        let view = i18n_view()?;
        let rewriter = TypeTextRewriter::new(&view);
        let slots = rewriter.classify_slots();

        let text = "{\n  code?: string;\n  label?: Array<string";
        assert_eq!(rewriter.retype_properties(text, &slots)?, text);

        let text = "{ label?: string) }";
        assert_eq!(rewriter.retype_properties(text, &slots)?, text);
        Ok(())
    }

    #[test]
    fn test_inline_object_properties() -> Result<()> {
        let view = i18n_view()?;
        let rewriter = TypeTextRewriter::new(&view);
        let slots = rewriter.classify_slots();

        let output = rewriter.retype_properties("type T = { label: string, \"caption\"?: Map<string, string> };", &slots)?;
        assert_eq!(output, "type T = { label: I18NString, \"caption\"?: I18NString };");
        Ok(())
    }

    #[test]
    fn test_custom_settings() -> Result<()> {
        let view = view(
            r"
name: custom
slots:
  title:
    annotations:
      jsonld_container: '@lang'
",
        )?;
        let settings = I18nConfig {
            type_name: "LangMap".to_string(),
            map_type: "Map<string, string>".to_string(),
            language_marker: "@lang".to_string(),
        };
        let output = TypeTextRewriter::with_settings(&view, settings).rewrite("{\n  title?: string;\n}\n")?;

        assert_eq!(output, "{\n  title?: LangMap;\n}\n");
        Ok(())
    }

    #[test]
    fn test_apostrophe_in_doc_comment_does_not_duplicate_alias() -> Result<()> {
        let view = view(
            r"
name: test
classes:
  I18NString:
    attributes:
      value:
        description: It's the text
",
        )?;
        let text = "export interface I18NString {\n  /**\n   * It's the text\n   */\n  value?: string;\n}\n\nexport interface Next {\n  label?: string;\n}\n";
        let output = TypeTextRewriter::new(&view).unify_i18n_type(text)?;

        assert_eq!(output, format!("{ALIAS}\n\nexport interface Next {{\n  label?: string;\n}}\n"));
        assert_eq!(output.matches("I18NString").count(), 1);
        Ok(())
    }

    #[test]
    fn test_comment_punctuation_ignored_in_expression() -> Result<()> {
        let view = i18n_view()?;
        let rewriter = TypeTextRewriter::new(&view);
        let slots = rewriter.classify_slots();

        let output = rewriter.retype_properties("{\n  label?: /* it's ) */ string;\n}", &slots)?;
        assert_eq!(output, "{\n  label?: I18NString;\n}");
        Ok(())
    }

    #[test]
    fn test_unterminated_declaration_is_not_prepended() -> Result<()> {
        let view = i18n_view()?;
        let text = "export interface I18NString {\n  value?: string;\n";
        let output = TypeTextRewriter::new(&view).unify_i18n_type(text)?;

        assert_eq!(output, text);
        Ok(())
    }
}
