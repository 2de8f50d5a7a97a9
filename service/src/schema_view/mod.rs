//! `SchemaView` - read-only navigation over a loaded `LinkML` schema
//!
//! The view is built once per schema source. Class ancestry is computed up
//! front, so every inheritance query afterwards is a lookup followed by a
//! nearest-first scan.

pub mod induced;
pub mod view;

pub use induced::{InducedSlot, SlotInducer};
pub use view::{SchemaView, SchemaViewError};
