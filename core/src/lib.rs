//! # `LinkML` Core
//!
//! Core types for `LinkML` artifact generation in Rust.
//!
//! This crate provides the schema data model consumed by the generators in
//! `linkml_artifacts`: classes, slots, types, enums and prefixes as they are
//! written in a `LinkML` schema document, the open-ended annotation values
//! attached to them, and the shared error type.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for `LinkML` operations
pub mod error;

/// Type definitions for `LinkML` schemas
pub mod types;

/// Annotation support for schema elements
pub mod annotations;

// Re-export commonly used types
pub use annotations::{Annotatable, AnnotationValue, Annotations};
pub use error::{LinkMLError, Result};
pub use serde_json::Value;
pub use types::{
    ClassDefinition, EnumDefinition, PrefixDefinition, SchemaDefinition, SlotDefinition,
    TypeDefinition,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::annotations::*;
    pub use crate::error::{LinkMLError, Result};
    pub use crate::types::*;
}
