//! Numbering level render and counter rules.
use super::marker::{MarkerType, Whitespace};
use super::pattern::MarkerPattern;
use crate::style::{ParagraphProperties, StyleFormat};
use serde::Serialize;
use std::collections::BTreeMap;

/// Numbering instance id (`w:numId`).
pub type NumberingId = u32;

/// Abstract numbering id (`w:abstractNumId`).
pub type AbstractNumberingId = u32;

/// Level id (`w:ilvl`), which is also the indentation depth it governs.
pub type LevelId = u8;

/// Counter snapshot: level → current value.
pub type Counters = BTreeMap<LevelId, i32>;

/// When a level's counter restarts (`w:lvlRestart`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Restart {
    /// Never restart
    Never,
    /// Restart whenever any shallower level advances
    #[default]
    OnAncestorAdvance,
    /// Restart only when the level with this 1-based number advances
    AfterLevel(u8),
}

impl Restart {
    /// Interpret a `w:lvlRestart/@w:val` value: `0` never restarts, a
    /// negative value restarts on any ancestor, `n` restarts after level `n`.
    pub fn from_value(value: i32) -> Self {
        match value {
            0 => Self::Never,
            v if v < 0 => Self::OnAncestorAdvance,
            v => Self::AfterLevel(u8::try_from(v).unwrap_or(u8::MAX)),
        }
    }

    /// Check if advancing `advanced` restarts a deeper level with this policy.
    #[inline]
    pub fn triggered_by(self, advanced: LevelId) -> bool {
        match self {
            Self::Never => false,
            Self::OnAncestorAdvance => true,
            Self::AfterLevel(level) => u16::from(advanced) + 1 == u16::from(level),
        }
    }
}

/// Render and counter rules of one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelProperties {
    /// Marker template (`w:lvlText`)
    pub pattern: MarkerPattern,
    /// Number format (`w:numFmt`)
    pub marker: MarkerType,
    /// Trailing whitespace (`w:suff`)
    pub whitespace: Whitespace,
    /// Start value (`w:start`)
    pub start: i32,
    /// Restart policy (`w:lvlRestart`)
    pub restart: Restart,
    /// Start value forced by an instance override (`w:startOverride`);
    /// `None` means a switch of numbering instance does not restart
    pub override_start: Option<i32>,
    /// Render every placeholder as decimal (`w:isLgl`)
    pub legal: bool,
}

impl Default for LevelProperties {
    fn default() -> Self {
        Self {
            pattern: MarkerPattern::default(),
            marker: MarkerType::Decimal,
            whitespace: Whitespace::Tab,
            start: 1,
            restart: Restart::OnAncestorAdvance,
            override_start: None,
            legal: false,
        }
    }
}

impl LevelProperties {
    /// The value a fresh counter starts at.
    #[inline]
    pub fn effective_start(&self) -> i32 {
        self.override_start.unwrap_or(self.start)
    }
}

/// An effective level of an [`Enumeration`](super::Enumeration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    /// Level id
    pub id: LevelId,
    /// Render and counter rules
    pub properties: LevelProperties,
    /// Raw id of the paragraph style owning this level (`w:pStyle`)
    pub style: Option<String>,
    /// Paragraph properties the level applies to its paragraphs, between
    /// the paragraph style and direct formatting
    #[serde(skip)]
    pub paragraph: ParagraphProperties,
    /// Effective formatting of a paragraph at this level: the owning style
    /// with the level's paragraph properties applied
    pub format: StyleFormat,
}

impl Level {
    /// Create a level with default formatting and no owning style.
    pub fn new(id: LevelId, properties: LevelProperties) -> Self {
        Self {
            id,
            properties,
            style: None,
            paragraph: ParagraphProperties::default(),
            format: StyleFormat::default(),
        }
    }
}
