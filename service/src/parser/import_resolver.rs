//! Import resolution for `LinkML` schemas
//!
//! Only local imports are followed. Imports of the metamodel (`linkml:types`
//! and friends) name built-in types and are skipped.

use linkml_core::{
    error::{LinkMLError, Result},
    types::SchemaDefinition,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Parser;

const METAMODEL_PREFIX: &str = "linkml:";
const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Import resolver for handling schema imports
pub struct ImportResolver {
    parser: Parser,
    visited: HashSet<PathBuf>,
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportResolver {
    /// Create a new import resolver
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            visited: HashSet::new(),
        }
    }

    /// Resolve all imports of `schema`, which was loaded from `path`,
    /// returning the merged schema
    ///
    /// Definitions already present in the importing schema always win over
    /// imported ones.
    ///
    /// # Errors
    ///
    /// Returns a `LinkMLError` if a local import cannot be found or parsed
    pub fn resolve(mut self, schema: SchemaDefinition, path: &Path) -> Result<SchemaDefinition> {
        self.visited.insert(canonical(path));
        self.resolve_recursive(schema, path)
    }

    fn resolve_recursive(
        &mut self,
        mut schema: SchemaDefinition,
        path: &Path,
    ) -> Result<SchemaDefinition> {
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        for import in schema.imports.clone() {
            if import.starts_with(METAMODEL_PREFIX) {
                continue;
            }

            let import_path = find_import_file(&base_dir, &import)?;
            if !self.visited.insert(canonical(&import_path)) {
                continue;
            }

            debug!(import = %import, path = %import_path.display(), "resolving import");
            let imported = self.parser.parse_file(&import_path)?;
            let imported = self.resolve_recursive(imported, &import_path)?;
            merge_schema(&mut schema, imported);
        }

        Ok(schema)
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Find the file for an import, relative to the importing file's directory
fn find_import_file(base_dir: &Path, import: &str) -> Result<PathBuf> {
    let direct = base_dir.join(import);
    let has_known_extension = direct
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e));
    if has_known_extension && direct.is_file() {
        return Ok(direct);
    }

    for ext in EXTENSIONS {
        let candidate = base_dir.join(format!("{import}.{ext}"));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(LinkMLError::import(
        import,
        format!("no schema file found relative to {}", base_dir.display()),
    ))
}

/// Merge an imported schema into the current schema, inserting only names
/// the target does not define yet
fn merge_schema(target: &mut SchemaDefinition, source: SchemaDefinition) {
    for (prefix, def) in source.prefixes {
        target.prefixes.entry(prefix).or_insert(def);
    }
    for (name, class) in source.classes {
        target.classes.entry(name).or_insert(class);
    }
    for (name, slot) in source.slots {
        target.slots.entry(name).or_insert(slot);
    }
    for (name, ty) in source.types {
        target.types.entry(name).or_insert(ty);
    }
    for (name, en) in source.enums {
        target.enums.entry(name).or_insert(en);
    }
}
