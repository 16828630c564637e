//! Priority classes over styles and numbering levels.
//!
//! Two items are compared dimension by dimension; the first dimension that
//! tells them apart decides. Items are then grouped into an ordered list of
//! classes, highest priority first, by inserting them one at a time.
use super::config::{HierarchyOptions, LevelDimension, StyleDimension};
use crate::numbering::{Level, LevelId, MarkerType, NumberingId, NumberingRegistry};
use crate::style::{Justification, StyleFormat, StyleRegistry};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Relative priority of one item against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Priority {
    /// Strictly lower: sits deeper in the tree
    Lower,
    /// Same class
    Same,
    /// Strictly higher: sits shallower in the tree
    Higher,
}

impl Priority {
    /// `-1`, `0` or `+1`.
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Lower => -1,
            Self::Same => 0,
            Self::Higher => 1,
        }
    }
}

impl From<Ordering> for Priority {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Lower,
            Ordering::Equal => Self::Same,
            Ordering::Greater => Self::Higher,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lower => "lower",
            Self::Same => "same",
            Self::Higher => "higher",
        })
    }
}

/// Compare two effective styles along `dimensions`.
pub fn compare_styles(a: &StyleFormat, b: &StyleFormat, dimensions: &[StyleDimension]) -> Priority {
    let centered = |f: &StyleFormat| f.paragraph.justification == Justification::Center;
    dimensions
        .iter()
        .map(|dimension| match dimension {
            StyleDimension::FontSize => a.run.font_size.cmp(&b.run.font_size),
            StyleDimension::Bold => a.run.bold.cmp(&b.run.bold),
            StyleDimension::Italic => a.run.italic.cmp(&b.run.italic),
            StyleDimension::Underline => a.run.underline.cmp(&b.run.underline),
            StyleDimension::Indentation => b
                .paragraph
                .indentation
                .start
                .cmp(&a.paragraph.indentation.start),
            StyleDimension::Justification => centered(a).cmp(&centered(b)),
        })
        .find(|ordering| ordering.is_ne())
        .map_or(Priority::Same, Priority::from)
}

/// Rank of a marker type; higher ranks sit shallower.
///
/// Types outside the fixed precedence rank with decimal.
#[inline]
pub fn marker_rank(marker: MarkerType) -> u8 {
    match marker {
        MarkerType::UpperRoman => 6,
        MarkerType::UpperLetter => 5,
        MarkerType::LowerRoman => 3,
        MarkerType::LowerLetter => 2,
        MarkerType::Bullet => 1,
        MarkerType::None => 0,
        _ => 4,
    }
}

/// Compare two levels along `dimensions`, using `styles` for the
/// [`LevelDimension::Style`] dimension.
pub fn compare_levels(
    a: &Level,
    b: &Level,
    dimensions: &[LevelDimension],
    styles: &[StyleDimension],
) -> Priority {
    dimensions
        .iter()
        .map(|dimension| match dimension {
            LevelDimension::MarkerType => Priority::from(
                marker_rank(a.properties.marker).cmp(&marker_rank(b.properties.marker)),
            ),
            LevelDimension::Style => compare_styles(&a.format, &b.format, styles),
            LevelDimension::Depth => Priority::from(b.id.cmp(&a.id)),
        })
        .find(|&priority| priority != Priority::Same)
        .unwrap_or(Priority::Same)
}

/// Ordered equivalence classes, highest priority first.
#[derive(Debug, Clone)]
pub struct PriorityClasses<T> {
    classes: Vec<Vec<T>>,
}

impl<T> Default for PriorityClasses<T> {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
        }
    }
}

impl<T> PriorityClasses<T> {
    /// Create an empty ordering.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item`, comparing it against each class's first member.
    ///
    /// Walking front to back, the item starts a new class before the first
    /// class it outranks, or joins the first class it ties with; otherwise it
    /// starts a new last class.
    pub fn insert(&mut self, item: T, mut compare: impl FnMut(&T, &T) -> Priority) {
        for i in 0..self.classes.len() {
            match compare(&item, &self.classes[i][0]) {
                Priority::Higher => {
                    self.classes.insert(i, vec![item]);
                    return;
                },
                Priority::Same => {
                    self.classes[i].push(item);
                    return;
                },
                Priority::Lower => {},
            }
        }
        self.classes.push(vec![item]);
    }

    /// Number of classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if nothing was inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over the classes, highest priority first.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> {
        self.classes.iter().map(Vec::as_slice)
    }

    /// Map every item to its class rank (`0` is the highest).
    pub fn ranks<K>(&self, mut key: impl FnMut(&T) -> K) -> HashMap<K, usize>
    where
        K: Eq + std::hash::Hash,
    {
        self.classes
            .iter()
            .enumerate()
            .flat_map(|(rank, class)| class.iter().map(move |item| (rank, item)))
            .map(|(rank, item)| (key(item), rank))
            .collect()
    }
}

/// Class ranks of every canonical style and, per numbering instance, of
/// every level.
#[derive(Debug, Clone, Default)]
pub struct PriorityClassifier {
    styles: HashMap<String, usize>,
    levels: HashMap<NumberingId, HashMap<LevelId, usize>>,
}

impl PriorityClassifier {
    /// Classify the styles of `styles` and the levels of each enumeration.
    ///
    /// Build this after every block-level format has been interned.
    pub fn new(
        styles: &StyleRegistry,
        numbering: &NumberingRegistry,
        options: &HierarchyOptions,
    ) -> Self {
        let mut style_classes = PriorityClasses::new();
        for style in styles.iter() {
            style_classes.insert(style, |a, b| {
                compare_styles(&a.format, &b.format, &options.style_dimensions)
            });
        }
        log::debug!(
            "{} styles in {} priority classes",
            styles.len(),
            style_classes.len()
        );

        let mut levels = HashMap::with_capacity(numbering.len());
        for enumeration in numbering.iter() {
            let mut level_classes = PriorityClasses::new();
            for level in enumeration.levels() {
                level_classes.insert(level, |a, b| {
                    compare_levels(a, b, &options.level_dimensions, &options.style_dimensions)
                });
            }
            levels.insert(enumeration.id, level_classes.ranks(|level| level.id));
        }

        Self {
            styles: style_classes.ranks(|style| style.id.clone()),
            levels,
        }
    }

    /// Class rank of a canonical style.
    pub fn style_rank(&self, style: &str) -> Option<usize> {
        self.styles.get(style).copied()
    }

    /// Class rank of a level within its numbering instance.
    pub fn level_rank(&self, numbering: NumberingId, level: LevelId) -> Option<usize> {
        self.levels
            .get(&numbering)
            .and_then(|levels| levels.get(&level))
            .copied()
    }

    /// Priority of style `a` relative to style `b`. Unknown styles tie.
    pub fn compare_styles(&self, a: &str, b: &str) -> Priority {
        match (self.style_rank(a), self.style_rank(b)) {
            (Some(a), Some(b)) => Priority::from(b.cmp(&a)),
            _ => Priority::Same,
        }
    }

    /// Priority of level `a` relative to level `b` of the same instance.
    /// Unknown levels tie.
    pub fn compare_levels(&self, numbering: NumberingId, a: LevelId, b: LevelId) -> Priority {
        match (self.level_rank(numbering, a), self.level_rank(numbering, b)) {
            (Some(a), Some(b)) => Priority::from(b.cmp(&a)),
            _ => Priority::Same,
        }
    }
}
