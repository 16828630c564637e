//! Run and paragraph formatting properties and their cascade rules.
//!
//! Properties exist at two stages:
//!
//! - **Definition level** ([`RunProperties`], [`ParagraphProperties`],
//!   [`TableProperties`], bundled as [`StyleProperties`]): what one style,
//!   paragraph or run states directly. Every field is optional.
//! - **Effective level** ([`RunFormat`], [`ParagraphFormat`], [`TableFormat`],
//!   bundled as [`StyleFormat`]): fully resolved values. Nothing is optional
//!   except the table part, so no unresolved value reaches the hierarchizer.
//!
//! Scalars cascade by override: a level's own value wins over the inherited
//! one. The toggle properties (bold, italic, underline) follow the
//! WordprocessingML toggle rule instead: every style in a `basedOn` chain
//! *flips* the inherited state, so the chain is XOR-accumulated and only
//! anchored against the document default when an effective value is
//! produced. Direct formatting on a paragraph or run sets values outright.
use crate::common::{RGBColor, Script};
use serde::Serialize;

/// Paragraph justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Justification {
    /// Aligned to the leading edge (`left`/`start`)
    #[default]
    Start,
    /// Centered
    Center,
    /// Aligned to the trailing edge (`right`/`end`)
    End,
    /// Justified on both edges
    Both,
    /// Distributed across the line
    Distribute,
}

impl Justification {
    /// Parse from a `w:jc/@w:val` attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::End),
            "both" | "justify" => Some(Self::Both),
            "distribute" => Some(Self::Distribute),
            _ => None,
        }
    }
}

/// Parse a toggle property element (`w:b`, `w:i`, ...).
///
/// An element without `w:val` is an implicit `true`; `"1"`, `"true"` and
/// `"on"` (case-insensitive) are `true`; anything else is `false`.
pub fn parse_toggle(val: Option<&str>) -> bool {
    match val {
        None => true,
        Some(v) => {
            v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("on")
        },
    }
}

/// Parse a `w:u` element: `"none"` means no underline, any other value (or
/// no value) means underlined.
pub fn parse_underline(val: Option<&str>) -> bool {
    !matches!(val, Some(v) if v.eq_ignore_ascii_case("none"))
}

#[inline]
fn xor_toggle(agg: Option<bool>, add: Option<bool>) -> Option<bool> {
    match (agg, add) {
        (None, None) => None,
        _ => Some(agg.unwrap_or(false) ^ add.unwrap_or(false)),
    }
}

/// Run-level properties as stated by one definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunProperties {
    /// Font size in half-points (`w:sz`)
    pub font_size: Option<u32>,
    /// Font color (`w:color`)
    pub color: Option<RGBColor>,
    /// Vertical position (`w:vertAlign`)
    pub script: Option<Script>,
    /// Bold toggle (`w:b`)
    pub bold: Option<bool>,
    /// Italic toggle (`w:i`)
    pub italic: Option<bool>,
    /// Underline toggle (`w:u`)
    pub underline: Option<bool>,
}

impl RunProperties {
    /// Check if no property is stated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Inherit `add` on top of this accumulation along a style chain.
    ///
    /// Scalars are replaced when `add` states them; toggles are XOR-ed.
    pub fn cascade(&self, add: &RunProperties) -> RunProperties {
        RunProperties {
            font_size: add.font_size.or(self.font_size),
            color: add.color.or(self.color),
            script: add.script.or(self.script),
            bold: xor_toggle(self.bold, add.bold),
            italic: xor_toggle(self.italic, add.italic),
            underline: xor_toggle(self.underline, add.underline),
        }
    }

    /// Lay `top` over this set: every property `top` states wins, toggles
    /// included.
    pub fn overlay(&self, top: &RunProperties) -> RunProperties {
        RunProperties {
            font_size: top.font_size.or(self.font_size),
            color: top.color.or(self.color),
            script: top.script.or(self.script),
            bold: top.bold.or(self.bold),
            italic: top.italic.or(self.italic),
            underline: top.underline.or(self.underline),
        }
    }

    /// Anchor this accumulation against the document defaults.
    ///
    /// Unstated scalars take the default; toggles become
    /// `default XOR accumulated`.
    pub fn resolve(&self, defaults: &RunFormat) -> RunFormat {
        RunFormat {
            font_size: self.font_size.unwrap_or(defaults.font_size),
            color: self.color.unwrap_or(defaults.color),
            script: self.script.unwrap_or(defaults.script),
            bold: defaults.bold ^ self.bold.unwrap_or(false),
            italic: defaults.italic ^ self.italic.unwrap_or(false),
            underline: defaults.underline ^ self.underline.unwrap_or(false),
        }
    }
}

/// Combine an accumulated property set with one more level of a style chain
/// and anchor the result against `default`.
///
/// For toggles this is `default XOR (add XOR agg)`; for scalars `add` wins
/// when present.
pub fn aggregate(agg: &RunProperties, add: &RunProperties, default: &RunFormat) -> RunFormat {
    agg.cascade(add).resolve(default)
}

/// Fully resolved run formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RunFormat {
    /// Font size in half-points
    pub font_size: u32,
    /// Font color
    pub color: RGBColor,
    /// Vertical position
    pub script: Script,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underlined
    pub underline: bool,
}

impl Default for RunFormat {
    /// Application defaults used when the document states none: 10pt black
    /// baseline text with every toggle off.
    fn default() -> Self {
        Self {
            font_size: 20,
            color: RGBColor::default(),
            script: Script::Baseline,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl RunFormat {
    /// Apply direct formatting: every stated property is set as-is.
    pub fn apply(&self, direct: &RunProperties) -> RunFormat {
        RunFormat {
            font_size: direct.font_size.unwrap_or(self.font_size),
            color: direct.color.unwrap_or(self.color),
            script: direct.script.unwrap_or(self.script),
            bold: direct.bold.unwrap_or(self.bold),
            italic: direct.italic.unwrap_or(self.italic),
            underline: direct.underline.unwrap_or(self.underline),
        }
    }
}

/// Indentation as stated by one definition, in twentieths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentationProperties {
    /// Leading-edge indentation (`w:start`/`w:left`)
    pub start: Option<i32>,
    /// Trailing-edge indentation (`w:end`/`w:right`)
    pub end: Option<i32>,
    /// First-line indentation; negative for a hanging indent
    pub first: Option<i32>,
}

impl IndentationProperties {
    fn overlay(&self, top: &IndentationProperties) -> IndentationProperties {
        IndentationProperties {
            start: top.start.or(self.start),
            end: top.end.or(self.end),
            first: top.first.or(self.first),
        }
    }
}

/// Resolved indentation, in twentieths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Indentation {
    /// Leading-edge indentation
    pub start: i32,
    /// Trailing-edge indentation
    pub end: i32,
    /// First-line indentation; negative for a hanging indent
    pub first: i32,
}

/// A paragraph's binding to a numbering instance (`w:numPr`).
///
/// Both parts are optional at definition level: a style may name the
/// instance and leave the level to be derived, and a paragraph may override
/// only the level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberingReference {
    /// Numbering instance id (`w:numId`); `0` removes numbering
    pub id: Option<u32>,
    /// Level (`w:ilvl`)
    pub level: Option<u8>,
}

impl NumberingReference {
    fn overlay(&self, top: &NumberingReference) -> NumberingReference {
        NumberingReference {
            id: top.id.or(self.id),
            level: top.level.or(self.level),
        }
    }
}

/// Paragraph-level properties as stated by one definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParagraphProperties {
    /// Justification (`w:jc`)
    pub justification: Option<Justification>,
    /// Indentation (`w:ind`)
    pub indentation: IndentationProperties,
    /// Numbering binding (`w:numPr`); not part of structural style equality
    pub numbering: Option<NumberingReference>,
}

impl ParagraphProperties {
    /// Inherit `add` on top of this accumulation. Paragraph properties have
    /// no toggles, so this is a per-field override.
    pub fn cascade(&self, add: &ParagraphProperties) -> ParagraphProperties {
        ParagraphProperties {
            justification: add.justification.or(self.justification),
            indentation: self.indentation.overlay(&add.indentation),
            numbering: match (self.numbering, add.numbering) {
                (Some(base), Some(top)) => Some(base.overlay(&top)),
                (base, top) => top.or(base),
            },
        }
    }

    /// Fill unstated fields from the defaults.
    pub fn resolve(&self, defaults: &ParagraphFormat) -> ParagraphFormat {
        ParagraphFormat {
            justification: self.justification.unwrap_or(defaults.justification),
            indentation: Indentation {
                start: self
                    .indentation
                    .start
                    .unwrap_or(defaults.indentation.start),
                end: self.indentation.end.unwrap_or(defaults.indentation.end),
                first: self
                    .indentation
                    .first
                    .unwrap_or(defaults.indentation.first),
            },
        }
    }
}

/// Fully resolved paragraph formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ParagraphFormat {
    /// Justification
    pub justification: Justification,
    /// Indentation
    pub indentation: Indentation,
}

impl ParagraphFormat {
    /// Apply direct paragraph formatting.
    pub fn apply(&self, direct: &ParagraphProperties) -> ParagraphFormat {
        direct.resolve(self)
    }
}

/// Table-level properties as stated by one definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableProperties {
    /// Table justification (`w:tblPr/w:jc`)
    pub justification: Option<Justification>,
    /// Leading-edge indentation of the table (`w:tblInd`)
    pub indentation: Option<i32>,
}

impl TableProperties {
    /// Per-field override of this set by `add`.
    pub fn cascade(&self, add: &TableProperties) -> TableProperties {
        TableProperties {
            justification: add.justification.or(self.justification),
            indentation: add.indentation.or(self.indentation),
        }
    }

    /// Fill unstated fields with zero values.
    pub fn resolve(&self) -> TableFormat {
        TableFormat {
            justification: self.justification.unwrap_or_default(),
            indentation: self.indentation.unwrap_or(0),
        }
    }
}

/// Fully resolved table formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TableFormat {
    /// Table justification
    pub justification: Justification,
    /// Leading-edge indentation
    pub indentation: i32,
}

impl TableFormat {
    /// Apply direct table formatting.
    pub fn apply(&self, direct: &TableProperties) -> TableFormat {
        TableFormat {
            justification: direct.justification.unwrap_or(self.justification),
            indentation: direct.indentation.unwrap_or(self.indentation),
        }
    }
}

/// Everything one style definition (or one accumulated chain) states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleProperties {
    /// Run properties (`w:rPr`)
    pub run: RunProperties,
    /// Paragraph properties (`w:pPr`)
    pub paragraph: ParagraphProperties,
    /// Table properties (`w:tblPr`), table styles only
    pub table: Option<TableProperties>,
}

impl StyleProperties {
    /// Inherit `add` on top of this accumulation.
    pub fn cascade(&self, add: &StyleProperties) -> StyleProperties {
        StyleProperties {
            run: self.run.cascade(&add.run),
            paragraph: self.paragraph.cascade(&add.paragraph),
            table: match (self.table, add.table) {
                (Some(base), Some(top)) => Some(base.cascade(&top)),
                (base, top) => top.or(base),
            },
        }
    }

    /// Anchor this accumulation against the document defaults.
    pub fn resolve(&self, defaults: &StyleFormat) -> StyleFormat {
        StyleFormat {
            run: self.run.resolve(&defaults.run),
            paragraph: self.paragraph.resolve(&defaults.paragraph),
            table: self.table.map(|t| t.resolve()),
        }
    }
}

/// Effective, fully populated formatting of a style.
///
/// This is the structural identity of a style: two styles with equal
/// `StyleFormat`s are interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct StyleFormat {
    /// Run formatting
    pub run: RunFormat,
    /// Paragraph formatting
    pub paragraph: ParagraphFormat,
    /// Table formatting, for table styles
    pub table: Option<TableFormat>,
}

/// Document-wide default properties (`w:docDefaults`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentDefaults {
    /// `w:rPrDefault`
    pub run: RunProperties,
    /// `w:pPrDefault`
    pub paragraph: ParagraphProperties,
}

impl DocumentDefaults {
    /// Resolve the defaults against the application defaults.
    ///
    /// Toggles stated here set the anchor every style chain is XOR-ed
    /// against.
    pub fn resolve(&self) -> StyleFormat {
        StyleFormat {
            run: RunFormat::default().apply(&self.run),
            paragraph: self.paragraph.resolve(&ParagraphFormat::default()),
            table: None,
        }
    }
}
