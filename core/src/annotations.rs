//! Annotation support for LinkML schemas
//!
//! Annotations are arbitrary key-value pairs that can be attached to any
//! LinkML schema element. Generators consult a few well-known keys as
//! tooling hints; every other key is carried along untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value types for annotations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnnotationValue {
    /// String value
    String(String),
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(serde_json::Number),
    /// Array of values
    Array(Vec<AnnotationValue>),
    /// Object/map of values
    Object(IndexMap<String, AnnotationValue>),
    /// Null value
    Null,
}

/// A collection of annotations
pub type Annotations = IndexMap<String, AnnotationValue>;

/// Annotation keys understood by the artifact generators
pub mod standard_annotations {
    /// Container shape for a slot (or for every slot ranging over a class)
    /// in the JSON-LD context, e.g. `@set`, `@list` or `@language`
    pub const JSONLD_CONTAINER: &str = "jsonld_container";

    /// Replaces the whole JSON-LD context entry of a slot with this IRI
    pub const JSONLD_ID: &str = "jsonld_id";
}

impl AnnotationValue {
    /// Textual form of the annotation value.
    ///
    /// The expanded `LinkML` form `{tag: ..., value: ...}` yields the text of
    /// its `value`. Scalars render as their literal text; arrays, other
    /// objects and null have no textual form.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            AnnotationValue::String(s) => Some(s.clone()),
            AnnotationValue::Bool(b) => Some(b.to_string()),
            AnnotationValue::Number(n) => Some(n.to_string()),
            AnnotationValue::Object(obj) => obj.get("value").and_then(AnnotationValue::as_text),
            AnnotationValue::Array(_) | AnnotationValue::Null => None,
        }
    }
}

/// Trait for elements that can have annotations
pub trait Annotatable {
    /// Get the annotations for this element
    fn annotations(&self) -> Option<&Annotations>;

    /// Get a mutable reference to annotations
    fn annotations_mut(&mut self) -> &mut Option<Annotations>;

    /// Get a specific annotation value
    fn get_annotation(&self, key: &str) -> Option<&AnnotationValue> {
        self.annotations()?.get(key)
    }

    /// Get the textual value of an annotation
    fn annotation_text(&self, key: &str) -> Option<String> {
        self.get_annotation(key).and_then(AnnotationValue::as_text)
    }

    /// Set an annotation, creating the annotation map if needed
    fn set_annotation(&mut self, key: impl Into<String>, value: AnnotationValue) {
        self.annotations_mut()
            .get_or_insert_with(Annotations::new)
            .insert(key.into(), value);
    }
}

impl From<String> for AnnotationValue {
    fn from(s: String) -> Self {
        AnnotationValue::String(s)
    }
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        AnnotationValue::String(s.to_string())
    }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        AnnotationValue::Bool(b)
    }
}

impl From<i32> for AnnotationValue {
    fn from(n: i32) -> Self {
        AnnotationValue::Number(n.into())
    }
}

impl From<Value> for AnnotationValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => AnnotationValue::String(s),
            Value::Bool(b) => AnnotationValue::Bool(b),
            Value::Number(n) => AnnotationValue::Number(n),
            Value::Array(arr) => {
                AnnotationValue::Array(arr.into_iter().map(AnnotationValue::from).collect())
            }
            Value::Object(obj) => AnnotationValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, AnnotationValue::from(v)))
                    .collect(),
            ),
            Value::Null => AnnotationValue::Null,
        }
    }
}

/// Helper to merge annotations from multiple sources; keys from
/// `override_annotations` win
#[must_use]
pub fn merge_annotations(
    base: Option<&Annotations>,
    override_annotations: Option<&Annotations>,
) -> Option<Annotations> {
    match (base, override_annotations) {
        (None, None) => None,
        (Some(b), None) => Some(b.clone()),
        (None, Some(o)) => Some(o.clone()),
        (Some(b), Some(o)) => {
            let mut merged = b.clone();
            for (key, value) in o {
                merged.insert(key.clone(), value.clone());
            }
            Some(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_value_conversions() {
        let av: AnnotationValue = "test".into();
        assert_eq!(av, AnnotationValue::String("test".to_string()));

        let av: AnnotationValue = true.into();
        assert_eq!(av, AnnotationValue::Bool(true));

        let av: AnnotationValue = 42.into();
        if let AnnotationValue::Number(n) = av {
            assert_eq!(n.as_i64(), Some(42));
        } else {
            panic!("Expected Number");
        }
    }

    #[test]
    fn test_as_text_simple_and_tagged_forms() -> anyhow::Result<()> {
        let simple: Annotations = serde_yaml::from_str("jsonld_container: '@set'")?;
        assert_eq!(
            simple.get("jsonld_container").and_then(AnnotationValue::as_text),
            Some("@set".to_string())
        );

        let tagged: Annotations = serde_yaml::from_str(
            "jsonld_container:\n  tag: jsonld_container\n  value: '@language'\n",
        )?;
        assert_eq!(
            tagged.get("jsonld_container").and_then(AnnotationValue::as_text),
            Some("@language".to_string())
        );

        assert_eq!(AnnotationValue::Null.as_text(), None);
        assert_eq!(AnnotationValue::Array(vec!["a".into()]).as_text(), None);
        Ok(())
    }

    #[test]
    fn test_merge_annotations() {
        let mut base = Annotations::new();
        base.insert("key1".to_string(), "value1".into());
        base.insert("key2".to_string(), "value2".into());

        let mut override_ann = Annotations::new();
        override_ann.insert("key2".to_string(), "new_value2".into());
        override_ann.insert("key3".to_string(), "value3".into());

        let merged = merge_annotations(Some(&base), Some(&override_ann)).unwrap_or_default();

        assert_eq!(merged.get("key1"), Some(&AnnotationValue::from("value1")));
        assert_eq!(merged.get("key2"), Some(&AnnotationValue::from("new_value2")));
        assert_eq!(merged.get("key3"), Some(&AnnotationValue::from("value3")));
        assert_eq!(merge_annotations(None, None), None);
    }
}
