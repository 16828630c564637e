//! Common formatting value types.
//!
//! This module provides the scalar formatting types the property model
//! cascades: font colors and vertical text position.

// Submodule declarations
pub mod color;
pub mod script;

// Re-exports
pub use color::RGBColor;
pub use script::Script;
