//! Typed directives read from slot and range annotations
//!
//! Only a closed set of annotation keys is ever interpreted. Every other
//! annotation stays on the schema element untouched.

use linkml_core::{
    annotations::{Annotatable, AnnotationValue, standard_annotations},
    types::SlotDefinition,
};
use tracing::debug;

use crate::schema_view::SchemaView;

/// The annotation-driven directives the generators understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// JSON-LD container shape (`jsonld_container`)
    Container,
    /// Replacement for the whole context entry (`jsonld_id`)
    IdOverride,
    /// Language-tagged text; a `jsonld_container` equal to the language marker
    LanguageTag,
}

impl DirectiveKind {
    /// Annotation key this directive is read from
    #[must_use]
    pub const fn annotation_key(self) -> &'static str {
        match self {
            Self::Container | Self::LanguageTag => standard_annotations::JSONLD_CONTAINER,
            Self::IdOverride => standard_annotations::JSONLD_ID,
        }
    }
}

/// Directives resolved for one slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotDirectives {
    /// Container for the slot's context entry
    pub container: Option<String>,
    /// Literal replacement for the slot's context entry
    pub id_override: Option<String>,
    /// Whether the slot holds language-tagged text
    pub language_tagged: bool,
}

/// Resolves [`SlotDirectives`] against a schema view
pub struct AnnotationResolver<'a> {
    view: &'a SchemaView,
    language_marker: String,
}

impl<'a> AnnotationResolver<'a> {
    /// Create a resolver using `@language` as the language-tag marker
    #[must_use]
    pub fn new(view: &'a SchemaView) -> Self {
        Self::with_language_marker(view, "@language")
    }

    /// Create a resolver with a custom language-tag marker
    #[must_use]
    pub fn with_language_marker(view: &'a SchemaView, marker: impl Into<String>) -> Self {
        Self {
            view,
            language_marker: marker.into(),
        }
    }

    /// Container for a slot: the slot's own annotation wins over one on the
    /// class named by its range
    #[must_use]
    pub fn resolve_container(&self, slot: &SlotDefinition) -> Option<String> {
        let key = DirectiveKind::Container.annotation_key();
        let from_range = slot
            .range
            .as_deref()
            .and_then(|range| self.view.get_class(range))
            .and_then(|class| class.annotation_text(key));

        match slot.annotation_text(key) {
            Some(local) => {
                if let Some(inherited) = &from_range
                    && inherited != &local
                {
                    debug!(slot = %slot.name, class_level = %inherited, slot_level = %local, "slot container overrides range class container");
                }
                Some(local)
            }
            None => from_range,
        }
    }

    /// Identifier override carried by the slot itself
    #[must_use]
    pub fn resolve_id_override(&self, slot: &SlotDefinition) -> Option<String> {
        slot.annotation_text(DirectiveKind::IdOverride.annotation_key())
    }

    /// Whether a slot holds language-tagged text: its own container
    /// annotation, or that of the class, type or enum named by its range,
    /// equals the language marker
    #[must_use]
    pub fn is_language_tagged(&self, slot: &SlotDefinition) -> bool {
        let key = DirectiveKind::LanguageTag.annotation_key();
        let is_marker = |value: Option<String>| value.as_deref() == Some(self.language_marker.as_str());

        is_marker(slot.annotation_text(key))
            || is_marker(
                slot.range
                    .as_deref()
                    .and_then(|range| self.view.element_annotations(range))
                    .and_then(|annotations| annotations.get(key))
                    .and_then(AnnotationValue::as_text),
            )
    }

    /// All directives for a slot
    #[must_use]
    pub fn resolve(&self, slot: &SlotDefinition) -> SlotDirectives {
        SlotDirectives {
            container: self.resolve_container(slot),
            id_override: self.resolve_id_override(slot),
            language_tagged: self.is_language_tagged(slot),
        }
    }
}
