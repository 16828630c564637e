//! The flat, formatting-only document handed over by a package reader.
//!
//! Nothing here is resolved: styles are referenced by raw id, properties are
//! only what the XML states directly, and blocks form a flat sequence (tables
//! aside).
use crate::numbering::{AbstractNumberingDefinition, LevelId, NumberingDefinition, NumberingId};
use crate::style::{
    DocumentDefaults, NumberingReference, ParagraphProperties, RunProperties, StyleDefinition,
    TableProperties,
};
use smallvec::SmallVec;

/// Everything the resolvers and the hierarchizer consume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    /// `w:docDefaults`
    pub defaults: DocumentDefaults,
    /// Style definitions in definition order
    pub styles: Vec<StyleDefinition>,
    /// Numbering templates
    pub abstract_numberings: Vec<AbstractNumberingDefinition>,
    /// Numbering instances
    pub numberings: Vec<NumberingDefinition>,
    /// Body blocks in document order
    pub body: Vec<SourceBlock>,
}

/// A body-level block.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBlock {
    /// `w:p`
    Paragraph(SourceParagraph),
    /// `w:tbl`
    Table(SourceTable),
}

impl From<SourceParagraph> for SourceBlock {
    fn from(paragraph: SourceParagraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<SourceTable> for SourceBlock {
    fn from(table: SourceTable) -> Self {
        Self::Table(table)
    }
}

/// A paragraph with its direct formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceParagraph {
    /// Paragraph style (`w:pStyle`)
    pub style: Option<String>,
    /// Direct paragraph properties (`w:pPr`)
    pub properties: ParagraphProperties,
    /// Runs and hyperlinks in order
    pub content: SmallVec<[SourceContent; 4]>,
}

impl SourceParagraph {
    /// Create an empty paragraph with the given style.
    pub fn new(style: Option<&str>) -> Self {
        Self {
            style: style.map(String::from),
            ..Default::default()
        }
    }

    /// Create a paragraph of one unstyled run.
    pub fn with_text(style: Option<&str>, text: impl Into<String>) -> Self {
        Self::new(style).push(SourceRun::new(text))
    }

    /// Append a run.
    pub fn push(mut self, run: SourceRun) -> Self {
        self.content.push(SourceContent::Run(run));
        self
    }

    /// Bind the paragraph to a numbering instance directly (`w:numPr`).
    pub fn numbered(mut self, numbering: NumberingId, level: Option<LevelId>) -> Self {
        self.properties.numbering = Some(NumberingReference {
            id: Some(numbering),
            level,
        });
        self
    }
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    /// `w:r`
    Run(SourceRun),
    /// `w:hyperlink` and the runs inside it
    Hyperlink {
        /// Relationship id or anchor
        target: Option<String>,
        /// Runs
        runs: Vec<SourceRun>,
    },
}

/// A run of text with its direct formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRun {
    /// Character style (`w:rStyle`)
    pub style: Option<String>,
    /// Direct run properties (`w:rPr`)
    pub properties: RunProperties,
    /// Text, with tabs and breaks as `\t` and `\n`
    pub text: String,
}

impl SourceRun {
    /// Create an unstyled run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the character style.
    pub fn styled(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the direct run properties.
    pub fn with_properties(mut self, properties: RunProperties) -> Self {
        self.properties = properties;
        self
    }
}

/// A table: a grid of cells holding nested blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTable {
    /// Table style (`w:tblStyle`)
    pub style: Option<String>,
    /// Direct table properties (`w:tblPr`)
    pub properties: TableProperties,
    /// Rows of cells
    pub rows: Vec<Vec<SourceCell>>,
}

/// A table cell (`w:tc`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceCell {
    /// Blocks in the cell
    pub blocks: Vec<SourceBlock>,
}
