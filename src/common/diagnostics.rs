//! Non-fatal resolution diagnostics.
//!
//! Documents produced by other tools are often syntactically fine but
//! internally inconsistent: a paragraph points at a numbering instance that
//! was never defined, an override names a level its template lacks. These
//! are not worth aborting for. Each one is logged at `warn` level through the
//! `log` facade and kept as a structured [`Diagnostic`] so callers can report
//! them next to the resolved tree.
use crate::document::BlockId;
use serde::Serialize;
use std::fmt;

/// A recoverable inconsistency found while resolving a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// A block references a numbering instance that does not exist.
    UnknownNumbering { block: BlockId, numbering: u32 },
    /// A numbering instance references an abstract numbering that does not exist.
    UnknownAbstractNumbering { numbering: u32, abstract_numbering: u32 },
    /// A level override names a level absent from its template.
    OverrideLevelMissing { numbering: u32, level: u8 },
    /// A block resolved to a level its enumeration does not define.
    UnknownLevel {
        block: BlockId,
        numbering: u32,
        level: u8,
    },
    /// No level could be derived for a style bound to a numbering instance;
    /// level 0 was used.
    AmbiguousLevel {
        block: BlockId,
        numbering: u32,
        style: String,
    },
    /// A block or run references a style id that does not exist; the
    /// default style was used.
    UnknownStyle { block: BlockId, style: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNumbering { block, numbering } => write!(
                f,
                "block {block} references unknown numbering {numbering}; treated as unnumbered"
            ),
            Self::UnknownAbstractNumbering {
                numbering,
                abstract_numbering,
            } => write!(
                f,
                "numbering {numbering} references unknown abstract numbering {abstract_numbering}"
            ),
            Self::OverrideLevelMissing { numbering, level } => write!(
                f,
                "numbering {numbering} overrides level {level} which its template does not define"
            ),
            Self::UnknownLevel {
                block,
                numbering,
                level,
            } => write!(
                f,
                "block {block} uses level {level} of numbering {numbering} which is not defined; treated as unnumbered"
            ),
            Self::AmbiguousLevel {
                block,
                numbering,
                style,
            } => write!(
                f,
                "block {block}: style '{style}' has no level in numbering {numbering}; using level 0"
            ),
            Self::UnknownStyle { block, style } => write!(
                f,
                "block {block} references unknown style '{style}'; using the default style"
            ),
        }
    }
}

/// Collector for [`Diagnostic`]s raised during one resolution.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it as a warning.
    pub fn warn(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Number of diagnostics recorded so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the recorded diagnostics in the order they were raised.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Consume the collector, returning the diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
