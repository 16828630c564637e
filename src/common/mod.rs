//! Common types shared by the resolvers, the hierarchizer and the package reader.
//!
//! This module provides the unified error type, the non-fatal diagnostics
//! collector and the small formatting value types (colors, scripts) used by
//! the property model.

// Submodule declarations
pub mod diagnostics;
pub mod error;
pub mod style;

// Re-exports for convenience
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Error, Result};
pub use style::{RGBColor, Script};
