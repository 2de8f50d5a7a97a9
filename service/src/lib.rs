//! # LinkML Artifacts
//!
//! Derived artifacts for `LinkML` schemas, built on a small schema view with
//! precomputed class ancestry.
//!
//! ## Overview
//!
//! Three artifacts are produced:
//!
//! - **JSON-LD context**: a baseline context from the schema's prefixes,
//!   classes and slots, with `jsonld_container` / `jsonld_id` annotations
//!   applied on top ([`generator::ContextBuilder`]).
//! - **Documentation index**: classes and slots aggregated across several
//!   schema sources, first source wins ([`generator::DocIndexBuilder`]).
//! - **TypeScript declarations**: baseline interfaces with internationalized
//!   text properties retyped to a language map
//!   ([`generator::TypeTextRewriter`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linkml_artifacts::config::ArtifactConfig;
//! use linkml_artifacts::pipeline;
//! use std::path::Path;
//!
//! fn main() -> linkml_core::Result<()> {
//!     let config = ArtifactConfig::default();
//!     let context = pipeline::context_artifact(Path::new("schema.yaml"), &config)?;
//!     print!("{context}");
//!     Ok(())
//! }
//! ```
//!
//! ## Ordering
//!
//! The documentation index depends on the order sources are added: a class
//! declared by two sources is taken from the first. Directory sources are
//! read in file-name order so repeated runs agree.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)] // LinkML, JSON-LD, TypeScript are proper nouns

/// Schema parsing and import resolution
pub mod parser;

/// Read-only schema navigation and slot induction
pub mod schema_view;

/// Typed annotation directives
pub mod annotation_resolver;

/// Baseline generators and artifact builders
pub mod generator;

/// YAML configuration
pub mod config;

/// Random identifiers
pub mod id;

/// End-to-end artifact pipelines
pub mod pipeline;

/// Command-line interface
pub mod cli;

pub use annotation_resolver::{AnnotationResolver, DirectiveKind, SlotDirectives};
pub use config::ArtifactConfig;
pub use generator::{ContextBuilder, DocIndex, DocIndexBuilder, TypeTextRewriter};
pub use linkml_core::error::{LinkMLError, Result};
pub use parser::Parser;
pub use schema_view::{InducedSlot, SchemaView, SlotInducer};
