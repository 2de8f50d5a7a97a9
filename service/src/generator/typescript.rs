//! TypeScript code generator for `LinkML` schemas
//!
//! Emits one `export type` per schema type, one `export enum` per enum and
//! one `export interface` per class. Interfaces only list the slots a class
//! declares itself; inherited ones come in through `extends`. Property names
//! are written exactly as the schema spells them.

use linkml_core::prelude::*;
use std::fmt::Write;

use super::base::{BaseCodeFormatter, TypeMapper};
use super::traits::{Generator, GeneratorOptions, GeneratorResult};
use crate::schema_view::{InducedSlot, SchemaView, SlotInducer};

/// TypeScript generator
#[derive(Default)]
pub struct TypeScriptGenerator {
    /// Generator options
    options: GeneratorOptions,
}

impl TypeScriptGenerator {
    /// Create a new TypeScript generator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create generator with options
    #[must_use]
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn write_doc(&self, output: &mut String, description: Option<&str>, indent: &str) -> GeneratorResult<()> {
        if let Some(desc) = description
            && self.options.include_docs
        {
            let wrapped = BaseCodeFormatter::wrap_text(desc, 76, &format!("{indent} * "));
            writeln!(output, "{indent}/**")?;
            writeln!(output, "{indent} * {wrapped}")?;
            writeln!(output, "{indent} */")?;
        }
        Ok(())
    }

    fn generate_type_alias(&self, output: &mut String, view: &SchemaView, ty: &TypeDefinition) -> GeneratorResult<()> {
        self.write_doc(output, ty.description.as_deref(), "")?;
        let target = ty
            .base_type
            .as_deref()
            .map_or("string", |base| Self::primitive_or_named(view, base));
        writeln!(output, "export type {} = {target};", ty.name)?;
        writeln!(output)?;
        Ok(())
    }

    fn generate_enum(&self, output: &mut String, en: &EnumDefinition) -> GeneratorResult<()> {
        self.write_doc(output, en.description.as_deref(), "")?;
        writeln!(output, "export enum {} {{", en.name)?;
        for pv in &en.permissible_values {
            self.write_doc(output, pv.description.as_deref(), "  ")?;
            let literal = serde_json::to_string(&pv.text)
                .map_err(|e| super::traits::GeneratorError::Generation(e.to_string()))?;
            writeln!(output, "  {} = {literal},", Self::enum_member_name(&pv.text))?;
        }
        writeln!(output, "}}")?;
        writeln!(output)?;
        Ok(())
    }

    fn generate_interface(
        &self,
        output: &mut String,
        view: &SchemaView,
        inducer: &SlotInducer<'_>,
        class: &ClassDefinition,
    ) -> GeneratorResult<()> {
        self.write_doc(output, class.description.as_deref(), "")?;

        let parents: Vec<&str> = class
            .is_a
            .iter()
            .chain(class.mixins.iter())
            .map(String::as_str)
            .filter(|parent| view.get_class(parent).is_some())
            .collect();
        let extends_clause = if parents.is_empty() {
            String::new()
        } else {
            format!(" extends {}", parents.join(", "))
        };

        writeln!(output, "export interface {}{extends_clause} {{", class.name)?;
        for slot in inducer.induce_all(&class.name)? {
            if slot.inherited_from.is_none() {
                self.generate_field(output, view, &slot)?;
            }
        }
        writeln!(output, "}}")?;
        writeln!(output)?;
        Ok(())
    }

    fn generate_field(&self, output: &mut String, view: &SchemaView, slot: &InducedSlot) -> GeneratorResult<()> {
        self.write_doc(output, slot.description.as_deref(), "  ")?;

        let base_type = slot
            .range
            .as_deref()
            .map_or("string", |range| Self::primitive_or_named(view, range));
        let array = if slot.multivalued == Some(true) { "[]" } else { "" };
        let optional_marker = if slot.required == Some(true) { "" } else { "?" };

        writeln!(output, "  {}{optional_marker}: {base_type}{array};", slot.name)?;
        Ok(())
    }

    /// Schema classes, types and enums keep their names; anything else is
    /// mapped as a primitive
    fn primitive_or_named<'r>(view: &SchemaView, range: &'r str) -> &'r str {
        if view.get_class(range).is_some()
            || view.get_type(range).is_some()
            || view.get_enum(range).is_some()
        {
            range
        } else {
            TypeMapper::to_typescript(range)
        }
    }

    fn enum_member_name(text: &str) -> String {
        let mut name: String = text
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }
}

impl Generator for TypeScriptGenerator {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn generate(&self, view: &SchemaView) -> GeneratorResult<String> {
        let schema = view.schema();
        self.validate_schema(schema)?;

        let mut output = String::new();
        let source = if schema.name.is_empty() { &schema.id } else { &schema.name };
        writeln!(output, "// Generated from LinkML schema: {source}")?;
        writeln!(output, "// Do not edit by hand")?;
        writeln!(output)?;

        for ty in view.all_types().values() {
            self.generate_type_alias(&mut output, view, ty)?;
        }
        for en in view.all_enums().values() {
            self.generate_enum(&mut output, en)?;
        }

        let inducer = SlotInducer::new(view);
        for class in view.all_classes().values() {
            self.generate_interface(&mut output, view, &inducer, class)?;
        }

        Ok(output)
    }
}
