/// List numbering: templates, instances, counters and markers.
///
/// # Architecture
///
/// - `definition`: raw `w:abstractNum`, `w:num` and `w:lvl` definitions
/// - `level`: render and counter rules of one level
/// - `pattern`, `marker`, `words`: marker templates and number formats
/// - `resolver`: templates, style links and overrides resolved into
///   per-instance [`Enumeration`]s
/// - `counter`: running counters with start, override and restart rules
/// - `detect`: implied indices recovered from literal marker text
pub mod counter;
pub mod definition;
pub mod detect;
pub mod enumeration;
pub mod level;
pub mod marker;
pub mod pattern;
pub mod resolver;
pub mod words;

pub use counter::CounterEngine;
pub use definition::{
    AbstractNumberingDefinition, LevelDefinition, LevelOverride, NumberingDefinition,
};
pub use detect::{ImpliedIndexPolicy, ImpliedMatch, MatchKind};
pub use enumeration::{Detection, Enumeration};
pub use level::{
    AbstractNumberingId, Counters, Level, LevelId, LevelProperties, NumberingId, Restart,
};
pub use marker::{MarkerType, Whitespace};
pub use pattern::{MarkerPattern, Segment};
pub use resolver::{NumberingRegistry, NumberingResolver};
