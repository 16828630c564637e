//! Raw style definitions as handed over by a package reader.
use super::properties::{ParagraphProperties, RunProperties, StyleProperties, TableProperties};
use std::fmt;

/// Kind of a style definition (`w:style/@w:type`).
///
/// `basedOn` chains never cross kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleKind {
    /// Paragraph style
    #[default]
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style, exposing a list definition through `w:numPr`
    Numbering,
}

impl StyleKind {
    /// Parse from the XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::Numbering),
            _ => None,
        }
    }

    /// Convert to the XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::Numbering => "numbering",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// A single `<w:style>` definition.
///
/// # Examples
///
/// ```rust
/// use litchi_outline::style::{RunProperties, StyleDefinition, StyleKind};
///
/// let heading = StyleDefinition::new("Heading1", StyleKind::Paragraph)
///     .based_on("Normal")
///     .with_run(RunProperties {
///         font_size: Some(32),
///         bold: Some(true),
///         ..Default::default()
///     });
/// assert_eq!(heading.based_on.as_deref(), Some("Normal"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDefinition {
    /// Style identifier (`w:styleId`)
    pub id: String,
    /// UI-visible name
    pub name: Option<String>,
    /// Style kind
    pub kind: StyleKind,
    /// Parent style id (`w:basedOn`)
    pub based_on: Option<String>,
    /// Linked companion style id (`w:link`)
    pub link: Option<String>,
    /// Whether this is the default style of its kind
    pub is_default: bool,
    /// Directly stated properties
    pub properties: StyleProperties,
}

impl StyleDefinition {
    /// Create an empty definition.
    pub fn new(id: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Default::default()
        }
    }

    /// Set the parent style.
    pub fn based_on(mut self, parent: impl Into<String>) -> Self {
        self.based_on = Some(parent.into());
        self
    }

    /// Set the linked companion style.
    pub fn linked_to(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Mark this as the default style of its kind.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Set the run properties.
    pub fn with_run(mut self, run: RunProperties) -> Self {
        self.properties.run = run;
        self
    }

    /// Set the paragraph properties.
    pub fn with_paragraph(mut self, paragraph: ParagraphProperties) -> Self {
        self.properties.paragraph = paragraph;
        self
    }

    /// Set the table properties.
    pub fn with_table(mut self, table: TableProperties) -> Self {
        self.properties.table = Some(table);
        self
    }
}
