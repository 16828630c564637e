//! Tree construction from the flat block sequence.
use super::config::NumberingConflict;
use super::priority::{Priority, PriorityClassifier};
use crate::common::{Error, Result};
use crate::document::{Block, BlockId, BlockKind, BuiltDocument};

/// Places blocks into a tree in one forward pass.
///
/// Each block is compared with the previously placed one: on a tie it
/// becomes its sibling, when it has lower priority it becomes its child, and
/// when it has higher priority the comparison moves up to the previous
/// block's parent. The root ranks above everything.
pub struct Hierarchizer<'a> {
    classifier: &'a PriorityClassifier,
    conflict: NumberingConflict,
}

impl<'a> Hierarchizer<'a> {
    /// Create a hierarchizer.
    pub fn new(classifier: &'a PriorityClassifier, conflict: NumberingConflict) -> Self {
        Self {
            classifier,
            conflict,
        }
    }

    /// Build the tree: the body under the root, then each table cell under
    /// the table owning it.
    ///
    /// A table's children are the top blocks of its cells in row-major
    /// order; each cell keeps its own share of them.
    ///
    /// Returns the root and the blocks, in id order, with their relations
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PriorityConflict`] under [`NumberingConflict::Fail`]
    /// if two blocks sharing a numbering instance get contradicting verdicts.
    pub fn run(&self, built: BuiltDocument) -> Result<(Block, Vec<Block>)> {
        let BuiltDocument { mut blocks, body } = built;

        let mut root = Block::root();
        root.children = self.place(&mut blocks, BlockId::ROOT, &body)?;

        for i in 0..blocks.len() {
            let BlockKind::Table(table) = &blocks[i].kind else {
                continue;
            };
            let table_id = blocks[i].id;
            let sequences: Vec<Vec<Vec<BlockId>>> = table
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.children.clone()).collect())
                .collect();

            for (r, row) in sequences.into_iter().enumerate() {
                for (c, sequence) in row.into_iter().enumerate() {
                    let top = self.place(&mut blocks, table_id, &sequence)?;
                    blocks[i].children.extend(top.iter().copied());
                    if let BlockKind::Table(table) = &mut blocks[i].kind {
                        table.rows[r][c].children = top;
                    }
                }
            }
        }

        Ok((root, blocks))
    }

    /// Place `sequence` under `local_root` and return the ids that ended up
    /// directly under it.
    pub fn place(
        &self,
        blocks: &mut [Block],
        local_root: BlockId,
        sequence: &[BlockId],
    ) -> Result<Vec<BlockId>> {
        let mut top = Vec::new();
        let mut previous: Option<BlockId> = None;

        for &current in sequence {
            let parent = self.parent_of(blocks, local_root, previous, current)?;
            blocks[index(current)].parent = Some(parent);
            if parent == local_root {
                top.push(current);
            } else {
                blocks[index(parent)].children.push(current);
            }
            previous = Some(current);
        }

        Ok(top)
    }

    /// Walk up from `previous` until a block `current` ties with or ranks
    /// below.
    fn parent_of(
        &self,
        blocks: &[Block],
        local_root: BlockId,
        previous: Option<BlockId>,
        current: BlockId,
    ) -> Result<BlockId> {
        let mut candidate = previous;
        while let Some(previous) = candidate {
            let above = blocks[index(previous)].parent.unwrap_or(local_root);
            match self.compare(&blocks[index(current)], &blocks[index(previous)])? {
                Priority::Same => return Ok(above),
                Priority::Lower => {
                    // Tables are leaves.
                    return Ok(if blocks[index(previous)].is_table() {
                        above
                    } else {
                        previous
                    });
                },
                Priority::Higher => {
                    candidate = if above == local_root {
                        None
                    } else {
                        Some(above)
                    };
                },
            }
        }
        Ok(local_root)
    }

    /// Priority of `current` relative to `previous`.
    fn compare(&self, current: &Block, previous: &Block) -> Result<Priority> {
        let style = match (current.style(), previous.style()) {
            (Some(a), Some(b)) => self.classifier.compare_styles(a, b),
            _ => Priority::Same,
        };
        let (Some(a), Some(b)) = (current.index(), previous.index()) else {
            return Ok(style);
        };
        if a.numbering != b.numbering {
            return Ok(style);
        }

        let level = self.classifier.compare_levels(a.numbering, a.level, b.level);
        if style != Priority::Same && style != level {
            match self.conflict {
                NumberingConflict::Fail => {
                    return Err(Error::PriorityConflict {
                        current: current.id,
                        previous: previous.id,
                        numbering: a.numbering,
                        style,
                        level,
                    });
                },
                NumberingConflict::Override => log::debug!(
                    "blocks {} and {}: level priority {} overrides style priority {}",
                    current.id,
                    previous.id,
                    level,
                    style
                ),
            }
        }
        Ok(level)
    }
}

#[inline]
fn index(id: BlockId) -> usize {
    id.0 as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ResolutionContext;
    use crate::document::{
        BlockBuilder, SourceBlock, SourceCell, SourceDocument, SourceParagraph, SourceRun,
        SourceTable,
    };
    use crate::hierarchy::HierarchyOptions;
    use crate::numbering::{
        AbstractNumberingDefinition, LevelDefinition, LevelProperties, MarkerPattern, MarkerType,
        NumberingDefinition,
    };
    use crate::style::{
        IndentationProperties, ParagraphProperties, RunProperties, StyleDefinition, StyleKind,
    };

    fn heading(id: &str, font_size: u32) -> StyleDefinition {
        StyleDefinition::new(id, StyleKind::Paragraph)
            .based_on("Normal")
            .with_run(RunProperties {
                font_size: Some(font_size),
                bold: Some(true),
                ..Default::default()
            })
    }

    fn indented(start: i32) -> ParagraphProperties {
        ParagraphProperties {
            indentation: IndentationProperties {
                start: Some(start),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn source(body: Vec<SourceBlock>) -> SourceDocument {
        let level = |id: u8, template: &str, marker, indent| {
            LevelDefinition::new(
                id,
                LevelProperties {
                    pattern: MarkerPattern::parse(template),
                    marker,
                    ..Default::default()
                },
            )
            .with_paragraph(indented(indent))
        };
        SourceDocument {
            styles: vec![
                StyleDefinition::new("Normal", StyleKind::Paragraph)
                    .as_default()
                    .with_run(RunProperties {
                        font_size: Some(22),
                        ..Default::default()
                    }),
                heading("Heading1", 32),
                heading("Heading2", 26),
                StyleDefinition::new("Small", StyleKind::Paragraph)
                    .based_on("Normal")
                    .with_run(RunProperties {
                        font_size: Some(16),
                        ..Default::default()
                    }),
            ],
            abstract_numberings: vec![AbstractNumberingDefinition {
                id: 0,
                levels: vec![
                    level(0, "%1.", MarkerType::Decimal, 720),
                    level(1, "%2)", MarkerType::LowerLetter, 1440),
                ],
                ..Default::default()
            }],
            numberings: vec![NumberingDefinition::new(1, 0)],
            body,
            ..Default::default()
        }
    }

    fn tree(source: &SourceDocument, conflict: NumberingConflict) -> Result<(Block, Vec<Block>)> {
        let options = HierarchyOptions::new(conflict);
        let mut context = ResolutionContext::resolve(source)?;
        let built = BlockBuilder::new(&mut context, options.implied_indices).build(&source.body)?;
        let classifier = PriorityClassifier::new(&context.styles, &context.numbering, &options);
        Hierarchizer::new(&classifier, options.conflict).run(built)
    }

    fn text(style: &str, text: &str) -> SourceBlock {
        SourceParagraph::with_text(Some(style), text).into()
    }

    #[test]
    fn test_headings_nest_and_climb_back() {
        let source = source(vec![
            text("Heading1", "A"),
            text("Heading2", "A.1"),
            text("Normal", "body"),
            text("Normal", "more body"),
            text("Heading2", "A.2"),
            text("Heading1", "B"),
        ]);
        let (root, blocks) = tree(&source, NumberingConflict::Fail).unwrap();

        assert_eq!(root.children, vec![BlockId(0), BlockId(5)]);
        assert_eq!(blocks[0].children, vec![BlockId(1), BlockId(4)]);
        assert_eq!(blocks[1].children, vec![BlockId(2), BlockId(3)]);
        assert_eq!(blocks[4].parent, Some(BlockId(0)));
        assert_eq!(blocks[5].parent, Some(BlockId::ROOT));
    }

    #[test]
    fn test_list_levels_nest() {
        let source = source(vec![
            text("Heading1", "Title"),
            SourceParagraph::with_text(Some("Normal"), "one").numbered(1, Some(0)).into(),
            SourceParagraph::with_text(Some("Normal"), "one.a").numbered(1, Some(1)).into(),
            SourceParagraph::with_text(Some("Normal"), "two").numbered(1, Some(0)).into(),
        ]);
        let (_, blocks) = tree(&source, NumberingConflict::Fail).unwrap();

        assert_eq!(blocks[0].children, vec![BlockId(1), BlockId(3)]);
        assert_eq!(blocks[1].children, vec![BlockId(2)]);
    }

    #[test]
    fn test_conflicting_verdicts() {
        // Level 1 in a larger font than level 0: the styles say "higher",
        // the levels say "lower".
        let big = SourceParagraph::new(Some("Heading1"))
            .push(SourceRun::new("big"))
            .numbered(1, Some(1));
        let source = source(vec![
            SourceParagraph::with_text(Some("Normal"), "one").numbered(1, Some(0)).into(),
            big.into(),
        ]);

        let err = tree(&source, NumberingConflict::Fail).unwrap_err();
        assert!(matches!(
            err,
            Error::PriorityConflict {
                current: BlockId(1),
                previous: BlockId(0),
                numbering: 1,
                style: Priority::Higher,
                level: Priority::Lower,
            }
        ));

        let (_, blocks) = tree(&source, NumberingConflict::Override).unwrap();
        assert_eq!(blocks[1].parent, Some(BlockId(0)));
    }

    #[test]
    fn test_tables_are_leaves_with_local_trees() {
        let cell = SourceCell {
            blocks: vec![text("Heading2", "cell head"), text("Normal", "cell body")],
        };
        let source = source(vec![
            text("Normal", "intro"),
            SourceTable {
                rows: vec![vec![cell]],
                ..Default::default()
            }
            .into(),
            text("Small", "after"),
        ]);
        let (root, blocks) = tree(&source, NumberingConflict::Fail).unwrap();

        // "after" ranks below the table but cannot become its child.
        assert_eq!(blocks[4].parent, blocks[1].parent);
        assert_eq!(blocks[1].children, vec![BlockId(2)]);

        let BlockKind::Table(table) = &blocks[1].kind else {
            panic!("expected a table");
        };
        assert_eq!(table.rows[0][0].children, vec![BlockId(2)]);
        assert_eq!(blocks[2].parent, Some(BlockId(1)));
        assert_eq!(blocks[3].parent, Some(BlockId(2)));
        assert!(!root.children.contains(&BlockId(2)));
    }

    #[test]
    fn test_every_parent_lists_its_children() {
        let cell = |blocks| SourceCell { blocks };
        let source = source(vec![
            text("Heading1", "A"),
            SourceTable {
                rows: vec![
                    vec![
                        cell(vec![text("Heading2", "r0c0"), text("Normal", "under r0c0")]),
                        cell(vec![text("Normal", "r0c1")]),
                    ],
                    vec![cell(vec![]), cell(vec![text("Heading2", "r1c1")])],
                ],
                ..Default::default()
            }
            .into(),
            text("Heading1", "B"),
        ]);
        let (root, blocks) = tree(&source, NumberingConflict::Fail).unwrap();

        let table = blocks.iter().find(|b| b.is_table()).unwrap();
        let tops: Vec<BlockId> = match &table.kind {
            BlockKind::Table(t) => t.rows.iter().flatten().flat_map(|c| c.children.clone()).collect(),
            _ => unreachable!(),
        };
        assert_eq!(table.children, tops);
        assert_eq!(tops.len(), 3);

        for block in &blocks {
            let parent = block.parent.unwrap();
            let siblings = if parent == BlockId::ROOT {
                &root.children
            } else {
                &blocks[index(parent)].children
            };
            assert!(siblings.contains(&block.id), "{} missing from {}", block.id, parent);
        }
    }
}
