//! Main `SchemaView` API for schema introspection

use indexmap::{IndexMap, IndexSet};
use linkml_core::{
    annotations::Annotations,
    error::{LinkMLError, Result},
    types::{ClassDefinition, EnumDefinition, SchemaDefinition, SlotDefinition, TypeDefinition},
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use super::induced::{apply_slot_override, fill_unset};
use crate::parser::Parser;

/// Error type for `SchemaView` operations
#[derive(Debug, thiserror::Error)]
pub enum SchemaViewError {
    /// Element not found in schema
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Slot requested for a class it does not apply to
    #[error("Slot '{slot}' is not applicable to class '{class}'")]
    SlotNotApplicable {
        /// Requested slot
        slot: String,
        /// Class it was requested for
        class: String,
    },

    /// Circular dependency detected in inheritance chain
    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),
}

impl From<SchemaViewError> for LinkMLError {
    fn from(err: SchemaViewError) -> Self {
        match err {
            SchemaViewError::CircularDependency(class) => LinkMLError::schema_validation_at(
                format!("circular inheritance involving '{class}'"),
                class,
            ),
            other => LinkMLError::invalid_input(other.to_string()),
        }
    }
}

/// High-level `API` for `LinkML` schema introspection and navigation
///
/// `SchemaView` is immutable once built and cheap to clone.
#[derive(Clone, Debug)]
pub struct SchemaView {
    schema: Arc<SchemaDefinition>,

    /// Nearest-first ancestors of every class, self excluded
    ancestry: Arc<IndexMap<String, Vec<String>>>,
}

impl SchemaView {
    /// Create a new `SchemaView` from an already import-merged schema
    ///
    /// # Errors
    ///
    /// Returns `LinkMLError::SchemaValidationError` if a class inherits from
    /// itself through any chain of `is_a` and mixins.
    pub fn new(schema: SchemaDefinition) -> Result<Self> {
        let ancestry = compute_ancestry(&schema)?;
        Ok(Self {
            schema: Arc::new(schema),
            ancestry: Arc::new(ancestry),
        })
    }

    /// Load a schema file, resolve its local imports and build the view
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an import
    /// cannot be resolved, or the inheritance graph is cyclic.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let schema = Parser::with_import_resolution().parse_file(path.as_ref())?;
        Self::new(schema)
    }

    /// The underlying (merged) schema definition
    #[must_use]
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    // === Element lookups ===

    /// All classes in declaration order
    #[must_use]
    pub fn all_classes(&self) -> &IndexMap<String, ClassDefinition> {
        &self.schema.classes
    }

    /// All schema-level slots in declaration order
    #[must_use]
    pub fn all_slots(&self) -> &IndexMap<String, SlotDefinition> {
        &self.schema.slots
    }

    /// All types in declaration order
    #[must_use]
    pub fn all_types(&self) -> &IndexMap<String, TypeDefinition> {
        &self.schema.types
    }

    /// All enums in declaration order
    #[must_use]
    pub fn all_enums(&self) -> &IndexMap<String, EnumDefinition> {
        &self.schema.enums
    }

    /// Get a class definition
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDefinition> {
        self.schema.classes.get(name)
    }

    /// Get a schema-level slot definition
    #[must_use]
    pub fn get_slot(&self, name: &str) -> Option<&SlotDefinition> {
        self.schema.slots.get(name)
    }

    /// Get a type definition
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.schema.types.get(name)
    }

    /// Get an enum definition
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.schema.enums.get(name)
    }

    /// Schema-level slots followed by every class attribute; a later
    /// attribute replaces an earlier definition of the same name
    #[must_use]
    pub fn all_slots_with_attributes(&self) -> IndexMap<String, SlotDefinition> {
        let mut slots = self.schema.slots.clone();
        for class in self.schema.classes.values() {
            for (name, attribute) in &class.attributes {
                slots.insert(name.clone(), attribute.clone());
            }
        }
        slots
    }

    /// Annotations of the class, type or enum with this name, looked up in
    /// that order
    #[must_use]
    pub fn element_annotations(&self, name: &str) -> Option<&Annotations> {
        if let Some(class) = self.schema.classes.get(name) {
            class.annotations.as_ref()
        } else if let Some(ty) = self.schema.types.get(name) {
            ty.annotations.as_ref()
        } else {
            self.schema.enums.get(name)?.annotations.as_ref()
        }
    }

    // === Class hierarchy ===

    /// Nearest-first ancestors of a class, self excluded
    ///
    /// # Errors
    ///
    /// Returns an error if the class is not part of the schema
    pub fn class_ancestors(&self, name: &str) -> Result<&[String]> {
        self.ancestry
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SchemaViewError::ElementNotFound(name.to_string()).into())
    }

    /// Direct children (via `is_a` or mixins) in class declaration order
    #[must_use]
    pub fn class_children(&self, name: &str) -> Vec<String> {
        self.schema
            .classes
            .iter()
            .filter(|(_, class)| {
                class.is_a.as_deref() == Some(name) || class.mixins.iter().any(|m| m == name)
            })
            .map(|(child, _)| child.clone())
            .collect()
    }

    /// Slot names applicable to a class: its own `slots` and attributes,
    /// then those of each ancestor nearest-first, without duplicates
    ///
    /// # Errors
    ///
    /// Returns an error if the class is not part of the schema
    pub fn class_slots(&self, class_name: &str) -> Result<Vec<String>> {
        let mut slots = IndexSet::new();
        for class in self.lineage(class_name)? {
            slots.extend(class.slots.iter().cloned());
            slots.extend(class.attributes.keys().cloned());
        }
        Ok(slots.into_iter().collect())
    }

    /// The class itself followed by its ancestors that are defined in the
    /// schema, nearest-first
    pub(crate) fn lineage(&self, class_name: &str) -> Result<Vec<&ClassDefinition>> {
        let class = self
            .get_class(class_name)
            .ok_or_else(|| SchemaViewError::ElementNotFound(class_name.to_string()))?;
        let mut lineage = vec![class];
        lineage.extend(
            self.class_ancestors(class_name)?
                .iter()
                .filter_map(|ancestor| self.get_class(ancestor)),
        );
        Ok(lineage)
    }

    // === Slot induction ===

    /// Effective definition of `slot_name` as it applies to `class_name`
    ///
    /// Starts from the nearest attribute of that name (else the schema
    /// slot), applies `slot_usage` refinements furthest-first, fills unset
    /// fields from the slot's own `is_a`/mixins chain and finally from the
    /// schema's `default_range`.
    ///
    /// # Errors
    ///
    /// Returns `LinkMLError::InvalidInput` if the class is unknown, the
    /// slot does not apply to it, or the slot is defined nowhere.
    pub fn induced_slot(&self, slot_name: &str, class_name: &str) -> Result<SlotDefinition> {
        if !self.class_slots(class_name)?.iter().any(|s| s == slot_name) {
            return Err(SchemaViewError::SlotNotApplicable {
                slot: slot_name.to_string(),
                class: class_name.to_string(),
            }
            .into());
        }
        let lineage = self.lineage(class_name)?;

        let mut induced = lineage
            .iter()
            .find_map(|class| class.attributes.get(slot_name))
            .or_else(|| self.schema.slots.get(slot_name))
            .cloned()
            .ok_or_else(|| SchemaViewError::ElementNotFound(slot_name.to_string()))?;

        for class in lineage.iter().rev() {
            if let Some(usage) = class.slot_usage.get(slot_name) {
                apply_slot_override(&mut induced, usage);
            }
        }

        for parent in self.slot_ancestors(&induced) {
            if let Some(parent_def) = self.schema.slots.get(&parent) {
                fill_unset(&mut induced, parent_def);
            }
        }

        if induced.range.is_none() {
            induced.range.clone_from(&self.schema.default_range);
        }
        if induced.inlined_as_list == Some(true) {
            induced.inlined = Some(true);
        }
        if induced.identifier == Some(true) || induced.key == Some(true) {
            induced.required = Some(true);
        }
        induced.name = slot_name.to_string();

        Ok(induced)
    }

    /// Nearest-first `is_a`/mixins ancestors of a slot definition
    fn slot_ancestors(&self, slot: &SlotDefinition) -> Vec<String> {
        let mut seen = IndexSet::new();
        let mut queue: VecDeque<String> = slot
            .is_a
            .iter()
            .chain(slot.mixins.iter())
            .cloned()
            .collect();
        while let Some(parent) = queue.pop_front() {
            if parent == slot.name || !seen.insert(parent.clone()) {
                continue;
            }
            if let Some(def) = self.schema.slots.get(&parent) {
                queue.extend(def.is_a.iter().chain(def.mixins.iter()).cloned());
            }
        }
        seen.into_iter().collect()
    }

    // === URI/CURIE resolution ===

    /// URI of a named class, slot or type
    #[must_use]
    pub fn get_uri(&self, element_name: &str) -> Option<String> {
        let explicit = if let Some(class) = self.schema.classes.get(element_name) {
            class.class_uri.as_deref()
        } else if let Some(slot) = self.schema.slots.get(element_name) {
            slot.slot_uri.as_deref()
        } else if let Some(ty) = self.schema.types.get(element_name) {
            ty.uri.as_deref()
        } else {
            None
        };
        self.uri_for(explicit, element_name)
    }

    /// URI of a (possibly induced) slot definition
    #[must_use]
    pub fn slot_uri(&self, slot: &SlotDefinition) -> Option<String> {
        self.uri_for(slot.slot_uri.as_deref(), &slot.name)
    }

    /// URI of a class definition
    #[must_use]
    pub fn class_uri(&self, class: &ClassDefinition) -> Option<String> {
        self.uri_for(class.class_uri.as_deref(), &class.name)
    }

    /// Explicit URI if given, else `default_prefix:name`, else `<id>/name`
    fn uri_for(&self, explicit: Option<&str>, name: &str) -> Option<String> {
        if let Some(uri) = explicit {
            return Some(uri.to_string());
        }
        if let Some(prefix) = &self.schema.default_prefix {
            return Some(format!("{prefix}:{name}"));
        }
        if self.schema.id.is_empty() {
            None
        } else {
            Some(format!("{}/{name}", self.schema.id.trim_end_matches('/')))
        }
    }

    /// Expand a CURIE to its full URI form; anything that is not a CURIE
    /// with a known prefix comes back unchanged
    #[must_use]
    pub fn expand_curie(&self, curie: &str) -> String {
        if let Some((prefix, local)) = curie.split_once(':')
            && let Some(reference) = self
                .schema
                .prefixes
                .get(prefix)
                .and_then(|p| p.reference())
        {
            return format!("{reference}{local}");
        }
        curie.to_string()
    }
}

fn direct_parents(class: &ClassDefinition) -> Vec<String> {
    class
        .is_a
        .iter()
        .chain(class.mixins.iter())
        .cloned()
        .collect()
}

/// Breadth-first, nearest-first ancestry for every class
fn compute_ancestry(schema: &SchemaDefinition) -> Result<IndexMap<String, Vec<String>>> {
    let mut ancestry = IndexMap::with_capacity(schema.classes.len());

    for (name, class) in &schema.classes {
        let mut seen: IndexSet<String> = IndexSet::new();
        let mut queue: VecDeque<String> = direct_parents(class).into();

        while let Some(parent) = queue.pop_front() {
            if &parent == name {
                return Err(SchemaViewError::CircularDependency(name.clone()).into());
            }
            if !seen.insert(parent.clone()) {
                continue;
            }
            match schema.classes.get(&parent) {
                Some(parent_def) => queue.extend(direct_parents(parent_def)),
                None => warn!(class = %name, parent = %parent, "parent class is not defined in the schema"),
            }
        }

        ancestry.insert(name.clone(), seen.into_iter().collect());
    }

    Ok(ancestry)
}
