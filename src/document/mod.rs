/// Source blocks, resolved blocks and the outline view over them.
///
/// # Architecture
///
/// - `source`: the flat, formatting-only input handed over by a reader
/// - `block`: resolved blocks, addressed by [`BlockId`] in an arena
/// - `builder`: effective formats and numbering indices per block
/// - `view`: the read-only outline tree
pub mod block;
pub mod builder;
pub mod source;
pub mod view;

pub use block::{
    Block, BlockId, BlockKind, Cell, Content, Format, Index, Paragraph, Table, normalize,
};
pub use builder::{BlockBuilder, BuiltDocument};
pub use source::{
    SourceBlock, SourceCell, SourceContent, SourceDocument, SourceParagraph, SourceRun,
    SourceTable,
};
pub use view::DocumentView;
