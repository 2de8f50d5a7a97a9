//! Artifact generators for `LinkML` schemas
//!
//! Two baseline generators render a schema as-is: a JSON-LD context and
//! TypeScript declarations. The builders on top of them apply what the
//! baseline output cannot express on its own (annotation directives,
//! internationalized text), and [`doc_index`] aggregates documentation across
//! several schema sources.

pub mod base;
pub mod context_builder;
pub mod doc_index;
pub mod jsonld_context;
pub mod traits;
pub mod typescript;
pub mod typescript_rewrite;

pub use context_builder::{ContextBuilder, DEFAULT_CONTEXT_VERSION};
pub use doc_index::{ClassDoc, DocIndex, DocIndexBuilder, SlotDoc, SlotUsage};
pub use jsonld_context::{JsonLdContextGenerator, JsonLdContextGeneratorConfig, JsonLdFeatures};
pub use traits::{Generator, GeneratorError, GeneratorOptions, GeneratorResult};
pub use typescript::TypeScriptGenerator;
pub use typescript_rewrite::{I18nSlot, TypeTextRewriter, quote_namespaced_properties};
