/// Office Open XML reading.
///
/// Only the WordprocessingML parts the outline needs are read: styles,
/// numbering and the document body. Everything else in the package is
/// ignored.
pub mod docx;
pub mod error;

pub use docx::Package;
pub use error::{OoxmlError, Result};
