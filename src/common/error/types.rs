//! Fatal error type for the outline pipeline.
use crate::document::BlockId;
use crate::hierarchy::Priority;
use thiserror::Error;

/// Main error type for outline resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error in one of the package parts
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// A required package part is missing
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A style inherits from a style id that does not exist
    #[error("style '{style}' is based on unknown style '{parent}'")]
    DanglingBasedOn { style: String, parent: String },

    /// A style inherits from a style of another kind
    #[error("style '{style}' ({kind}) is based on '{parent}' which is a {parent_kind} style")]
    BasedOnKindMismatch {
        style: String,
        kind: String,
        parent: String,
        parent_kind: String,
    },

    /// `basedOn` references form a cycle, so these styles have no root
    #[error("cyclic style inheritance between: {}", .0.join(", "))]
    CyclicInheritance(Vec<String>),

    /// A style reports a type the property model does not know
    #[error("style '{style}' has unrecognized type '{kind}'")]
    UnknownStyleKind { style: String, kind: String },

    /// Numbering style links lead back to an abstract numbering already visited
    #[error("numbering style links form a cycle through abstract numberings {}", format_ids(.0))]
    NumberingLinkCycle(Vec<u32>),

    /// A level override embeds the definition of a different level
    #[error(
        "numbering {numbering}: override for level {level} embeds a definition of level {embedded}"
    )]
    OverrideLevelMismatch {
        numbering: u32,
        level: u8,
        embedded: u8,
    },

    /// Style priority contradicts the numbering level priority of two blocks
    /// sharing a numbering instance
    #[error(
        "blocks {current} and {previous} share numbering {numbering} but style priority is {style} while level priority is {level}"
    )]
    PriorityConflict {
        current: BlockId,
        previous: BlockId,
        numbering: u32,
        style: Priority,
        level: Priority,
    },

    /// A marker detection pattern failed to compile
    #[error("invalid marker pattern: {0}")]
    InvalidPattern(String),
}

/// Result type for outline operations.
pub type Result<T> = std::result::Result<T, Error>;

fn format_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
