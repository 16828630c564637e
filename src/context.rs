//! The state shared by every phase of one document resolution.
use crate::common::{Diagnostics, Result};
use crate::document::SourceDocument;
use crate::numbering::{CounterEngine, NumberingRegistry, NumberingResolver};
use crate::style::{StyleRegistry, StyleResolver};

/// Effective styles, effective numbering, running counters and the
/// diagnostics raised so far.
///
/// Built once per document by [`ResolutionContext::resolve`] and then handed
/// by exclusive reference to the block builder, which interns block-level
/// formats and advances the counters.
#[derive(Debug)]
pub struct ResolutionContext {
    /// Canonical styles
    pub styles: StyleRegistry,
    /// Enumerations per numbering instance
    pub numbering: NumberingRegistry,
    /// Running list counters
    pub counters: CounterEngine,
    /// Non-fatal diagnostics
    pub diagnostics: Diagnostics,
}

impl ResolutionContext {
    /// Resolve the style and numbering definitions of a document.
    ///
    /// # Errors
    ///
    /// Propagates the fatal errors of [`StyleResolver::resolve`] and
    /// [`NumberingResolver::resolve`].
    pub fn resolve(source: &SourceDocument) -> Result<Self> {
        let styles = StyleResolver::new(&source.defaults, &source.styles).resolve()?;
        let mut diagnostics = Diagnostics::new();
        let numbering =
            NumberingResolver::new(&source.abstract_numberings, &source.numberings, &styles)
                .resolve(&mut diagnostics)?;

        Ok(Self {
            styles,
            numbering,
            counters: CounterEngine::new(),
            diagnostics,
        })
    }
}
