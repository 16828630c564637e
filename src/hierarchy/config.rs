//! Configuration types for hierarchization.
//!
//! This module defines the options controlling how priorities are derived
//! and how conflicting verdicts are settled.
use crate::numbering::ImpliedIndexPolicy;
use serde::Serialize;

/// What to do when two blocks share a numbering instance and their style
/// priority contradicts their level priority.
///
/// There is no default: callers choose one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumberingConflict {
    /// Abort with [`Error::PriorityConflict`](crate::common::Error::PriorityConflict)
    Fail,
    /// Trust the level priority
    Override,
}

/// A dimension two styles are compared along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleDimension {
    /// Larger font wins
    FontSize,
    /// Bold wins
    Bold,
    /// Italic wins
    Italic,
    /// Underlined wins
    Underline,
    /// Smaller leading indentation wins
    Indentation,
    /// Centered wins over any other justification
    Justification,
}

impl StyleDimension {
    /// Default comparison order.
    pub const DEFAULT: [StyleDimension; 3] = [Self::FontSize, Self::Bold, Self::Indentation];
}

/// A dimension two numbering levels are compared along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LevelDimension {
    /// Fixed marker type precedence
    MarkerType,
    /// The style dimensions, over the level's effective style
    Style,
    /// Shallower level wins
    Depth,
}

impl LevelDimension {
    /// Default comparison order.
    pub const DEFAULT: [LevelDimension; 3] = [Self::MarkerType, Self::Style, Self::Depth];
}

/// Options for building the outline tree.
///
/// # Examples
///
/// ```rust
/// use litchi_outline::hierarchy::{HierarchyOptions, NumberingConflict, StyleDimension};
/// use litchi_outline::numbering::ImpliedIndexPolicy;
///
/// let options = HierarchyOptions::new(NumberingConflict::Override)
///     .with_style_dimensions([StyleDimension::FontSize, StyleDimension::Bold])
///     .with_implied_indices(ImpliedIndexPolicy::StyleMatchOnly);
/// assert_eq!(options.style_dimensions.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyOptions {
    /// Settlement of contradicting verdicts
    pub conflict: NumberingConflict,
    /// Style comparison order
    pub style_dimensions: Vec<StyleDimension>,
    /// Level comparison order
    pub level_dimensions: Vec<LevelDimension>,
    /// Implied-index detection
    pub implied_indices: ImpliedIndexPolicy,
}

impl HierarchyOptions {
    /// Create options with the given conflict policy and default dimensions.
    /// Implied-index detection is off.
    pub fn new(conflict: NumberingConflict) -> Self {
        Self {
            conflict,
            style_dimensions: StyleDimension::DEFAULT.to_vec(),
            level_dimensions: LevelDimension::DEFAULT.to_vec(),
            implied_indices: ImpliedIndexPolicy::Disabled,
        }
    }

    /// Set the style comparison order.
    #[inline]
    pub fn with_style_dimensions(
        mut self,
        dimensions: impl IntoIterator<Item = StyleDimension>,
    ) -> Self {
        self.style_dimensions = dimensions.into_iter().collect();
        self
    }

    /// Set the level comparison order.
    #[inline]
    pub fn with_level_dimensions(
        mut self,
        dimensions: impl IntoIterator<Item = LevelDimension>,
    ) -> Self {
        self.level_dimensions = dimensions.into_iter().collect();
        self
    }

    /// Set the implied-index policy.
    #[inline]
    pub fn with_implied_indices(mut self, policy: ImpliedIndexPolicy) -> Self {
        self.implied_indices = policy;
        self
    }
}
