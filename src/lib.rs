//! Litchi Outline - logical structure recovery for Word documents
//!
//! A `.docx` body is a flat sequence of paragraphs and tables. Headings,
//! nested lists and the body text under them are only implied by
//! formatting. This library resolves every block's effective style and
//! list index and infers the document tree from them.
//!
//! # Pipeline
//!
//! - **Style resolution** ([`style`]): `basedOn` chains are cascaded,
//!   linked paragraph/character pairs merged and structurally equal styles
//!   collapsed into one canonical style.
//! - **Numbering resolution** ([`numbering`]): list templates, instances
//!   and overrides become enumerations; counters run in document order, and
//!   markers typed as literal text can be recognized as implied indices.
//! - **Block building** ([`document`]): each paragraph and table gets its
//!   effective format.
//! - **Hierarchizing** ([`hierarchy`]): styles and list levels are ranked
//!   into priority classes and a single forward pass places every block.
//!
//! # Example - Outlining a DOCX file
//!
//! ```no_run
//! use litchi_outline::hierarchy::{HierarchyOptions, NumberingConflict};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = HierarchyOptions::new(NumberingConflict::Override);
//! let view = litchi_outline::outline_docx("report.docx", &options)?;
//!
//! for (block, depth) in view.depth_first() {
//!     let marker = view.marker(block.id).unwrap_or_default();
//!     let text = view.text(block.id).unwrap_or_default();
//!     println!("{}{} {}", "  ".repeat(depth), marker, text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Outlining an in-memory document
//!
//! ```
//! use litchi_outline::document::{SourceDocument, SourceParagraph};
//! use litchi_outline::hierarchy::{HierarchyOptions, NumberingConflict};
//! use litchi_outline::style::{RunProperties, StyleDefinition, StyleKind};
//!
//! let source = SourceDocument {
//!     styles: vec![
//!         StyleDefinition::new("Normal", StyleKind::Paragraph).as_default(),
//!         StyleDefinition::new("Title", StyleKind::Paragraph).with_run(RunProperties {
//!             font_size: Some(48),
//!             ..Default::default()
//!         }),
//!     ],
//!     body: vec![
//!         SourceParagraph::with_text(Some("Title"), "Report").into(),
//!         SourceParagraph::with_text(None, "Body text").into(),
//!     ],
//!     ..Default::default()
//! };
//!
//! let view = litchi_outline::outline(&source, &HierarchyOptions::new(NumberingConflict::Fail))?;
//! let title = view.root().children[0];
//! assert_eq!(view.children(title).count(), 1);
//! # Ok::<(), litchi_outline::common::Error>(())
//! ```

/// Common types: errors, diagnostics, color and script values
pub mod common;

/// The resolution context shared by the pipeline phases
pub mod context;

/// Source blocks, resolved blocks and the outline view
pub mod document;

/// Priority classes and the hierarchizer
pub mod hierarchy;

/// Numbering definitions, enumerations, counters and marker detection
pub mod numbering;

/// The `.docx` package reader
pub mod ooxml;

/// Property model, style definitions and the style registry
pub mod style;

pub use common::{Error, Result};
pub use context::ResolutionContext;
pub use document::DocumentView;
pub use hierarchy::{HierarchyOptions, NumberingConflict};

use document::{BlockBuilder, SourceDocument};
use hierarchy::{Hierarchizer, PriorityClassifier};
use std::path::Path;

/// Recover the outline of an in-memory document.
///
/// # Errors
///
/// Returns the fatal resolution errors (dangling or cyclic `basedOn`,
/// numbering link cycles, mismatched overrides) and, under
/// [`NumberingConflict::Fail`], [`Error::PriorityConflict`].
pub fn outline(source: &SourceDocument, options: &HierarchyOptions) -> Result<DocumentView> {
    let mut context = ResolutionContext::resolve(source)?;
    log::debug!(
        "resolved {} canonical styles and {} enumerations",
        context.styles.len(),
        context.numbering.len()
    );

    let built = BlockBuilder::new(&mut context, options.implied_indices).build(&source.body)?;

    let classifier = PriorityClassifier::new(&context.styles, &context.numbering, options);
    let (root, blocks) = Hierarchizer::new(&classifier, options.conflict).run(built)?;

    Ok(DocumentView::new(root, blocks, context))
}

/// Open a `.docx` file and recover its outline.
///
/// # Errors
///
/// Package errors (missing parts, malformed XML, unknown style kinds) and
/// everything [`outline`] returns.
pub fn outline_docx<P: AsRef<Path>>(path: P, options: &HierarchyOptions) -> Result<DocumentView> {
    let source = ooxml::Package::open(path)?.source()?;
    outline(&source, options)
}
