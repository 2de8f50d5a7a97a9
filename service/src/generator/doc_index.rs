//! Cross-source documentation index of classes and slots
//!
//! Sources are added one at a time and the result depends on their order:
//! the first source to define a class name owns that class entry, and a
//! slot entry keeps the fields of the first usage that created it. Usage
//! records accumulate in the order classes are processed.

use indexmap::IndexMap;
use linkml_core::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::schema_view::{InducedSlot, SchemaView, SlotInducer};

/// Class names that are never indexed
pub const DEFAULT_EXCLUDED_CLASSES: [&str; 2] = ["linkml:Any", "Any"];

/// The aggregated documentation index
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocIndex {
    /// Classes by name, in first-seen order
    pub classes: IndexMap<String, ClassDoc>,
    /// Slots by name, in first-seen order
    pub slots: IndexMap<String, SlotDoc>,
}

/// Documentation of one class
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassDoc {
    /// Class name
    pub name: String,
    /// Class description
    pub description: Option<String>,
    /// Canonical class URI
    pub class_uri: Option<String>,
    /// Direct parent
    pub is_a: Option<String>,
    /// Mixed-in classes
    pub mixins: Vec<String>,
    /// Every applicable slot, induced for this class
    pub slots: Vec<InducedSlot>,
    /// Whether the class is abstract
    #[serde(rename = "abstract")]
    pub abstract_: Option<bool>,
    /// Whether the class is the tree root
    pub tree_root: Option<bool>,
    /// Direct subclasses within the defining source
    pub children: Vec<String>,
}

/// Documentation of one slot
///
/// Top-level fields come from the first usage that created the entry, or
/// from the schema-level definition when no class uses the slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotDoc {
    /// Slot name
    pub name: String,
    /// Slot description
    pub description: Option<String>,
    /// Canonical slot URI
    pub slot_uri: Option<String>,
    /// Range of the slot
    pub range: Option<String>,
    /// Whether the slot holds several values
    pub multivalued: Option<bool>,
    /// Whether values are inlined; `None` leaves the key out entirely,
    /// which is the case for slots no class uses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlined: Option<Option<bool>>,
    /// Whether inlined values form a list
    pub inlined_as_list: Option<bool>,
    /// Whether the slot is required
    pub required: Option<bool>,
    /// Per-class usages in processing order
    pub usages: Vec<SlotUsage>,
}

/// How one class uses a slot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotUsage {
    /// Class the slot was induced for
    #[serde(rename = "class")]
    pub class_name: String,
    /// Range as seen by that class
    pub range: Option<String>,
    /// Multivalued as seen by that class
    pub multivalued: Option<bool>,
    /// Inlined as seen by that class
    pub inlined: Option<bool>,
    /// Inlined-as-list as seen by that class
    pub inlined_as_list: Option<bool>,
    /// Required as seen by that class
    pub required: Option<bool>,
    /// Description as seen by that class
    pub description: Option<String>,
}

impl From<&InducedSlot> for SlotUsage {
    fn from(slot: &InducedSlot) -> Self {
        Self {
            class_name: String::new(),
            range: slot.range.clone(),
            multivalued: slot.multivalued,
            inlined: slot.inlined,
            inlined_as_list: slot.inlined_as_list,
            required: slot.required,
            description: slot.description.clone(),
        }
    }
}

impl From<&InducedSlot> for SlotDoc {
    fn from(slot: &InducedSlot) -> Self {
        Self {
            name: slot.name.clone(),
            description: slot.description.clone(),
            slot_uri: slot.slot_uri.clone(),
            range: slot.range.clone(),
            multivalued: slot.multivalued,
            inlined: Some(slot.inlined),
            inlined_as_list: slot.inlined_as_list,
            required: slot.required,
            usages: Vec::new(),
        }
    }
}

/// Accumulates a [`DocIndex`] across schema sources
#[derive(Debug, Clone)]
pub struct DocIndexBuilder {
    index: DocIndex,
    excluded_classes: Vec<String>,
}

impl Default for DocIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocIndexBuilder {
    /// Create an empty builder excluding the metamodel's `Any` root
    #[must_use]
    pub fn new() -> Self {
        Self::with_excluded_classes(DEFAULT_EXCLUDED_CLASSES.iter().map(ToString::to_string))
    }

    /// Create an empty builder with a custom set of excluded class names
    #[must_use]
    pub fn with_excluded_classes(excluded: impl IntoIterator<Item = String>) -> Self {
        Self {
            index: DocIndex::default(),
            excluded_classes: excluded.into_iter().collect(),
        }
    }

    /// Fold one schema source into the index
    ///
    /// # Errors
    ///
    /// Returns an error if a slot of some class cannot be induced, which
    /// means the view is internally inconsistent.
    pub fn add_source(&mut self, view: &SchemaView) -> Result<()> {
        let inducer = SlotInducer::new(view);
        let mut added = 0usize;

        for (class_name, class) in view.all_classes() {
            if self.excluded_classes.iter().any(|c| c == class_name) {
                continue;
            }
            if self.index.classes.contains_key(class_name) {
                debug!(class = %class_name, "class already indexed by an earlier source");
                continue;
            }

            let slots = inducer.induce_all(class_name)?;
            for slot in &slots {
                let doc = self
                    .index
                    .slots
                    .entry(slot.name.clone())
                    .or_insert_with(|| SlotDoc::from(slot));
                doc.usages.push(SlotUsage {
                    class_name: class_name.clone(),
                    ..SlotUsage::from(slot)
                });
            }

            self.index.classes.insert(
                class_name.clone(),
                ClassDoc {
                    name: class_name.clone(),
                    description: class.description.clone(),
                    class_uri: view.class_uri(class),
                    is_a: class.is_a.clone(),
                    mixins: class.mixins.clone(),
                    slots,
                    abstract_: class.abstract_,
                    tree_root: class.tree_root,
                    children: view.class_children(class_name),
                },
            );
            added += 1;
        }

        for (slot_name, slot) in view.all_slots() {
            let slot_uri = view.slot_uri(slot);
            match self.index.slots.get_mut(slot_name) {
                Some(doc) => {
                    if doc.description.as_ref().is_none_or(String::is_empty) {
                        doc.description.clone_from(&slot.description);
                    }
                    if doc.slot_uri.as_ref().is_none_or(String::is_empty) {
                        doc.slot_uri = slot_uri;
                    }
                }
                None => {
                    self.index.slots.insert(
                        slot_name.clone(),
                        SlotDoc {
                            name: slot_name.clone(),
                            description: slot.description.clone(),
                            slot_uri,
                            range: slot.range.clone(),
                            multivalued: slot.multivalued,
                            inlined: None,
                            inlined_as_list: slot.inlined_as_list,
                            required: slot.required,
                            usages: Vec::new(),
                        },
                    );
                }
            }
        }

        info!(
            schema = %view.schema().name,
            classes_added = added,
            total_classes = self.index.classes.len(),
            total_slots = self.index.slots.len(),
            "indexed schema source"
        );
        Ok(())
    }

    /// Finish the run and hand out the index
    #[must_use]
    pub fn finalize(self) -> DocIndex {
        self.index
    }
}
