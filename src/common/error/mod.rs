//! Unified error types for the outline pipeline.
//!
//! Every error in this module is fatal: it stops resolution and carries the
//! ids needed to find the malformed definition. Recoverable inconsistencies
//! are reported through [`crate::common::Diagnostics`] instead.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
