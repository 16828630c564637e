//! Resolved blocks: the nodes of the outline tree.
use crate::numbering::{Counters, LevelId, NumberingId};
use serde::Serialize;
use std::fmt;

/// Block id, assigned in document order (pre-order through tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BlockId(pub u32);

impl BlockId {
    /// Id of the synthetic root.
    pub const ROOT: BlockId = BlockId(u32::MAX);

    /// Check if this is the synthetic root.
    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A block's binding to a numbering level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    /// Numbering instance, which is also the id of its enumeration
    pub numbering: NumberingId,
    /// Level
    pub level: LevelId,
    /// Counter snapshot for `level` and its ancestors
    pub counters: Counters,
    /// Recovered from literal marker text rather than numbering properties
    pub implied: bool,
}

/// Effective format of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Format {
    /// Canonical style id
    pub style: String,
    /// Numbering binding, if any
    pub index: Option<Index>,
}

/// Inline content of a paragraph, styled with canonical style ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Content {
    /// Plain run
    Run { style: String, text: String },
    /// Hyperlinked text
    Hyperlink {
        target: Option<String>,
        style: String,
        text: String,
    },
}

impl Content {
    /// Canonical style of the content.
    pub fn style(&self) -> &str {
        match self {
            Self::Run { style, .. } | Self::Hyperlink { style, .. } => style,
        }
    }

    /// Text of the content.
    pub fn text(&self) -> &str {
        match self {
            Self::Run { text, .. } | Self::Hyperlink { text, .. } => text,
        }
    }

    fn text_mut(&mut self) -> &mut String {
        match self {
            Self::Run { text, .. } | Self::Hyperlink { text, .. } => text,
        }
    }

    /// Append `next` to this content if both are of the same kind and style
    /// (and target). Returns `next` back if it cannot be merged.
    fn absorb(&mut self, next: Content) -> Option<Content> {
        match (self, next) {
            (Self::Run { style, text }, Self::Run { style: s, text: t }) if *style == s => {
                text.push_str(&t);
                None
            },
            (
                Self::Hyperlink {
                    target,
                    style,
                    text,
                },
                Self::Hyperlink {
                    target: tg,
                    style: s,
                    text: t,
                },
            ) if *style == s && *target == tg => {
                text.push_str(&t);
                None
            },
            (_, next) => Some(next),
        }
    }
}

/// Concatenate adjacent contents sharing kind and style; empty contents are
/// dropped.
pub fn normalize(content: impl IntoIterator<Item = Content>) -> Vec<Content> {
    let mut normalized: Vec<Content> = Vec::new();
    for item in content {
        if item.text().is_empty() {
            continue;
        }
        let rest = match normalized.last_mut() {
            Some(last) => last.absorb(item),
            None => Some(item),
        };
        if let Some(item) = rest {
            normalized.push(item);
        }
    }
    normalized
}

/// Paragraph payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Normalized inline content
    pub content: Vec<Content>,
}

impl Paragraph {
    /// Concatenated text of every content item.
    pub fn text(&self) -> String {
        self.content.iter().map(Content::text).collect()
    }

    /// Style of the first content item.
    pub fn leading_style(&self) -> Option<&str> {
        self.content.first().map(Content::style)
    }

    /// Remove the first `len` bytes of the concatenated text, splitting the
    /// item the cut falls in. Items left empty are dropped.
    ///
    /// Does nothing if `len` is not on a character boundary of the text.
    pub fn strip_prefix(&mut self, mut len: usize) {
        if !self.text().is_char_boundary(len) {
            return;
        }
        let mut drained = 0;
        for item in &mut self.content {
            if len == 0 {
                break;
            }
            let text = item.text_mut();
            if len >= text.len() {
                len -= text.len();
                drained += 1;
                continue;
            }
            text.drain(..len);
            len = 0;
        }
        self.content.drain(..drained);
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Top-level blocks of the cell; the flat block sequence until the cell
    /// is hierarchized
    pub children: Vec<BlockId>,
}

/// Table payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Rows of cells
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }
}

/// Variant payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// The synthetic root
    Root,
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A node of the outline tree.
///
/// Relations are stored as ids into the owning arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Id
    pub id: BlockId,
    /// Effective format; `None` only for the root
    pub format: Option<Format>,
    /// Parent, `None` only for the root
    pub parent: Option<BlockId>,
    /// Children, left to right
    pub children: Vec<BlockId>,
    /// Payload
    pub kind: BlockKind,
}

impl Block {
    /// Create the synthetic root.
    pub fn root() -> Self {
        Self {
            id: BlockId::ROOT,
            format: None,
            parent: None,
            children: Vec::new(),
            kind: BlockKind::Root,
        }
    }

    /// Canonical style id, if the block has a format.
    pub fn style(&self) -> Option<&str> {
        self.format.as_ref().map(|f| f.style.as_str())
    }

    /// Numbering binding, if any.
    pub fn index(&self) -> Option<&Index> {
        self.format.as_ref().and_then(|f| f.index.as_ref())
    }

    /// Check if this block is a table.
    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self.kind, BlockKind::Table(_))
    }
}
