//! Induced slots: a slot as it applies to one specific class

use linkml_core::{
    annotations::{Annotations, merge_annotations},
    error::Result,
    types::SlotDefinition,
};
use serde::{Deserialize, Serialize};

use super::SchemaView;

/// Effective definition of a slot for one class, plus where it came from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InducedSlot {
    /// Slot name
    pub name: String,
    /// Description after inheritance and `slot_usage`
    pub description: Option<String>,
    /// Effective range
    pub range: Option<String>,
    /// Multivalued flag
    pub multivalued: Option<bool>,
    /// Inlined flag
    pub inlined: Option<bool>,
    /// Inlined-as-list flag
    pub inlined_as_list: Option<bool>,
    /// Required flag
    pub required: Option<bool>,
    /// Nearest ancestor that declares the slot; `None` when the class
    /// declares it itself
    pub inherited_from: Option<String>,
    /// Slot URI
    pub slot_uri: Option<String>,
    /// Merged annotations of the effective definition
    #[serde(skip)]
    pub annotations: Option<Annotations>,
}

/// Computes induced slots against one `SchemaView`
pub struct SlotInducer<'a> {
    view: &'a SchemaView,
}

impl<'a> SlotInducer<'a> {
    /// Create an inducer over a schema view
    #[must_use]
    pub fn new(view: &'a SchemaView) -> Self {
        Self { view }
    }

    /// Induce `slot_name` for `class_name`
    ///
    /// Field values come from [`SchemaView::induced_slot`]. `inherited_from`
    /// is decided by declaration presence only: the first ancestor,
    /// nearest-first, whose own `slots` or attributes name the slot.
    ///
    /// # Errors
    ///
    /// Returns `LinkMLError::InvalidInput` if the slot does not apply to the
    /// class; no default-filled slot is ever returned in that case.
    pub fn induce(&self, class_name: &str, slot_name: &str) -> Result<InducedSlot> {
        let definition = self.view.induced_slot(slot_name, class_name)?;

        let inherited_from = self
            .view
            .class_ancestors(class_name)?
            .iter()
            .find(|ancestor| {
                self.view
                    .get_class(ancestor)
                    .is_some_and(|class| class.declares_slot(slot_name))
            })
            .cloned();

        Ok(InducedSlot {
            slot_uri: self.view.slot_uri(&definition),
            name: definition.name,
            description: definition.description,
            range: definition.range,
            multivalued: definition.multivalued,
            inlined: definition.inlined,
            inlined_as_list: definition.inlined_as_list,
            required: definition.required,
            inherited_from,
            annotations: definition.annotations,
        })
    }

    /// Induce every slot applicable to a class, in `class_slots` order
    ///
    /// # Errors
    ///
    /// Returns an error if the class is not part of the schema
    pub fn induce_all(&self, class_name: &str) -> Result<Vec<InducedSlot>> {
        self.view
            .class_slots(class_name)?
            .iter()
            .map(|slot_name| self.induce(class_name, slot_name))
            .collect()
    }
}

/// Override `target` with every field `override_def` sets; annotations
/// merge with the override winning per key
pub(crate) fn apply_slot_override(target: &mut SlotDefinition, override_def: &SlotDefinition) {
    target.annotations = merge_annotations(
        target.annotations.as_ref(),
        override_def.annotations.as_ref(),
    );

    macro_rules! override_fields {
        ($($field:ident),*) => {
            $(
                if override_def.$field.is_some() {
                    target.$field.clone_from(&override_def.$field);
                }
            )*
        };
    }
    override_fields!(
        description,
        range,
        required,
        multivalued,
        identifier,
        key,
        inlined,
        inlined_as_list,
        pattern,
        slot_uri
    );
}

/// Fill fields `target` leaves unset from `source`; existing annotation
/// keys on `target` win
pub(crate) fn fill_unset(target: &mut SlotDefinition, source: &SlotDefinition) {
    target.annotations = merge_annotations(source.annotations.as_ref(), target.annotations.as_ref());

    macro_rules! fill_fields {
        ($($field:ident),*) => {
            $(
                if target.$field.is_none() {
                    target.$field.clone_from(&source.$field);
                }
            )*
        };
    }
    fill_fields!(
        description,
        range,
        required,
        multivalued,
        identifier,
        key,
        inlined,
        inlined_as_list,
        pattern
    );
}
