/// Priority classes and the outline tree built from them.
///
/// # Architecture
///
/// - `config`: comparison dimensions and the conflict policy
/// - `priority`: the style and level comparators and their class orderings
/// - `hierarchizer`: the single forward pass placing blocks into the tree
pub mod config;
pub mod hierarchizer;
pub mod priority;

pub use config::{HierarchyOptions, LevelDimension, NumberingConflict, StyleDimension};
pub use hierarchizer::Hierarchizer;
pub use priority::{
    Priority, PriorityClasses, PriorityClassifier, compare_levels, compare_styles, marker_rank,
};
