//! Raw numbering definitions as handed over by a package reader.
use super::level::{AbstractNumberingId, LevelId, LevelProperties, NumberingId};
use crate::style::{ParagraphProperties, RunProperties};

/// A level as defined in a template or an override (`w:lvl`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelDefinition {
    /// Level id (`w:ilvl`)
    pub id: LevelId,
    /// Render and counter rules
    pub properties: LevelProperties,
    /// Paragraph style owning this level (`w:pStyle`)
    pub style: Option<String>,
    /// Paragraph properties applied at this level (`w:pPr`)
    pub paragraph: ParagraphProperties,
    /// Run properties of the marker (`w:rPr`)
    pub run: RunProperties,
}

impl LevelDefinition {
    /// Create a level with the given rules.
    pub fn new(id: LevelId, properties: LevelProperties) -> Self {
        Self {
            id,
            properties,
            ..Default::default()
        }
    }

    /// Set the owning paragraph style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the level's paragraph properties.
    pub fn with_paragraph(mut self, paragraph: ParagraphProperties) -> Self {
        self.paragraph = paragraph;
        self
    }
}

/// A reusable list template (`w:abstractNum`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbstractNumberingDefinition {
    /// Template id
    pub id: AbstractNumberingId,
    /// Levels in definition order
    pub levels: Vec<LevelDefinition>,
    /// Numbering style this template takes its levels from (`w:numStyleLink`)
    pub style_link: Option<String>,
    /// Numbering style this template defines (`w:styleLink`)
    pub num_style: Option<String>,
}

/// A per-instance level override (`w:lvlOverride`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelOverride {
    /// Level the override applies to (`w:ilvl`)
    pub level: LevelId,
    /// Forced start value (`w:startOverride`)
    pub start: Option<i32>,
    /// Replacement definition (`w:lvl`)
    pub definition: Option<LevelDefinition>,
}

/// A numbering instance (`w:num`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberingDefinition {
    /// Instance id
    pub id: NumberingId,
    /// Bound template
    pub abstract_id: AbstractNumberingId,
    /// Level overrides
    pub overrides: Vec<LevelOverride>,
}

impl NumberingDefinition {
    /// Create an instance of `abstract_id` without overrides.
    pub fn new(id: NumberingId, abstract_id: AbstractNumberingId) -> Self {
        Self {
            id,
            abstract_id,
            overrides: Vec::new(),
        }
    }

    /// Add a level override.
    pub fn with_override(mut self, level_override: LevelOverride) -> Self {
        self.overrides.push(level_override);
        self
    }
}
