//! Effective block formats: direct formatting composed over styles and
//! numbering.
use super::block::{
    Block, BlockId, BlockKind, Cell, Content, Format, Index, Paragraph, Table, normalize,
};
use super::source::{SourceBlock, SourceContent, SourceParagraph, SourceRun, SourceTable};
use crate::common::{Diagnostic, Result};
use crate::context::ResolutionContext;
use crate::numbering::detect::{classify, select};
use crate::numbering::ImpliedIndexPolicy;
use crate::style::{
    NumberingReference, ParagraphFormat, ParagraphProperties, StyleFormat, StyleProperties,
    StyleRegistry, aggregate,
};

/// Blocks in id order and the ids of the body-level blocks.
#[derive(Debug, Clone, Default)]
pub struct BuiltDocument {
    /// Every block; `blocks[i].id == BlockId(i)`
    pub blocks: Vec<Block>,
    /// Body-level blocks in document order
    pub body: Vec<BlockId>,
}

/// Builds resolved [`Block`]s from source blocks in document order.
///
/// Ids are assigned in pre-order: a table takes its id before the blocks of
/// its cells. Counters advance in the same order, so numbering continues
/// across cells and into the body after a table.
pub struct BlockBuilder<'c> {
    context: &'c mut ResolutionContext,
    policy: ImpliedIndexPolicy,
    blocks: Vec<Block>,
}

impl<'c> BlockBuilder<'c> {
    /// Create a builder.
    pub fn new(context: &'c mut ResolutionContext, policy: ImpliedIndexPolicy) -> Self {
        Self {
            context,
            policy,
            blocks: Vec::new(),
        }
    }

    /// Build every block of `body`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NumberingLinkCycle`](crate::common::Error::NumberingLinkCycle)
    /// if deriving a paragraph's level runs into a numbering link cycle.
    pub fn build(mut self, body: &[SourceBlock]) -> Result<BuiltDocument> {
        let body = self.sequence(body)?;
        log::debug!(
            "built {} blocks ({} at body level), {} canonical styles",
            self.blocks.len(),
            body.len(),
            self.context.styles.len()
        );
        Ok(BuiltDocument {
            blocks: self.blocks,
            body,
        })
    }

    fn sequence(&mut self, blocks: &[SourceBlock]) -> Result<Vec<BlockId>> {
        let mut ids = Vec::with_capacity(blocks.len());
        for block in blocks {
            let id = match block {
                SourceBlock::Paragraph(paragraph) => self.paragraph(paragraph)?,
                SourceBlock::Table(table) => self.table(table)?,
            };
            ids.push(id);
        }
        Ok(ids)
    }

    /// Take the next id, holding its slot with a placeholder.
    fn reserve(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block {
            id,
            format: None,
            parent: None,
            children: Vec::new(),
            kind: BlockKind::Root,
        });
        id
    }

    /// Raw id of a requested style, or the fallback if it is not defined.
    fn raw_style(
        &mut self,
        block: BlockId,
        requested: Option<&str>,
        fallback: fn(&StyleRegistry) -> &str,
    ) -> String {
        match requested {
            Some(id) if self.context.styles.contains(id) => id.to_string(),
            Some(id) => {
                self.context.diagnostics.warn(Diagnostic::UnknownStyle {
                    block,
                    style: id.to_string(),
                });
                fallback(&self.context.styles).to_string()
            },
            None => fallback(&self.context.styles).to_string(),
        }
    }

    fn paragraph(&mut self, source: &SourceParagraph) -> Result<BlockId> {
        let id = self.reserve();
        let style = self.raw_style(
            id,
            source.style.as_deref(),
            StyleRegistry::default_paragraph_style,
        );
        let cascade = self
            .context
            .styles
            .cascade(&style)
            .copied()
            .unwrap_or_default();

        // numPr cascades from the style chain into the paragraph.
        let reference = cascade.paragraph.cascade(&source.properties).numbering;
        let (mut index, level_paragraph) = match reference {
            Some(reference) => self.explicit_index(id, &style, reference)?,
            None => (None, ParagraphProperties::default()),
        };

        let defaults = *self.context.styles.defaults();
        let paragraph_format = cascade
            .paragraph
            .resolve(&defaults.paragraph)
            .apply(&level_paragraph)
            .apply(&source.properties);

        let mut content = Vec::with_capacity(source.content.len());
        for item in &source.content {
            match item {
                SourceContent::Run(run) => {
                    let run_style = self.run_style(id, &style, &cascade, paragraph_format, run);
                    content.push(Content::Run {
                        style: run_style,
                        text: run.text.clone(),
                    });
                },
                SourceContent::Hyperlink { target, runs } => {
                    for run in runs {
                        let run_style =
                            self.run_style(id, &style, &cascade, paragraph_format, run);
                        content.push(Content::Hyperlink {
                            target: target.clone(),
                            style: run_style,
                            text: run.text.clone(),
                        });
                    }
                },
            }
        }
        let mut paragraph = Paragraph {
            content: normalize(content),
        };

        // Only a numId, zero included, rules typed markers out.
        let numbered = reference.is_some_and(|r| r.id.is_some());
        if !numbered && self.policy.is_enabled() {
            index = self.implied_index(id, &style, &mut paragraph);
        }

        let block_style = match paragraph.leading_style() {
            Some(leading) => leading.to_string(),
            None => {
                let format = StyleFormat {
                    run: cascade.run.resolve(&defaults.run),
                    paragraph: paragraph_format,
                    table: None,
                };
                self.context.styles.intern(format, &style)
            },
        };

        let block = &mut self.blocks[id.0 as usize];
        block.format = Some(Format {
            style: block_style,
            index,
        });
        block.kind = BlockKind::Paragraph(paragraph);
        Ok(id)
    }

    /// Resolve a numbering reference, advancing the counters.
    ///
    /// Also returns the paragraph properties the resolved level applies.
    fn explicit_index(
        &mut self,
        block: BlockId,
        style: &str,
        reference: NumberingReference,
    ) -> Result<(Option<Index>, ParagraphProperties)> {
        let unindexed = (None, ParagraphProperties::default());
        let numbering = match reference.id {
            Some(0) | None => return Ok(unindexed),
            Some(numbering) => numbering,
        };
        let Some(enumeration) = self.context.numbering.get(numbering) else {
            self.context
                .diagnostics
                .warn(Diagnostic::UnknownNumbering { block, numbering });
            return Ok(unindexed);
        };

        let level = match reference.level {
            Some(level) => level,
            None => match self.context.numbering.find_style_level(numbering, style)? {
                Some(level) => level,
                None => {
                    self.context.diagnostics.warn(Diagnostic::AmbiguousLevel {
                        block,
                        numbering,
                        style: style.to_string(),
                    });
                    0
                },
            },
        };

        let Some(paragraph) = enumeration.level(level).map(|l| l.paragraph) else {
            self.context.diagnostics.warn(Diagnostic::UnknownLevel {
                block,
                numbering,
                level,
            });
            return Ok(unindexed);
        };

        let counters = self.context.counters.visit(enumeration, level);
        Ok((
            Some(Index {
                numbering,
                level,
                counters,
                implied: false,
            }),
            paragraph,
        ))
    }

    /// Canonical style of a run: the paragraph chain and the character
    /// chain XOR-ed against the defaults, then direct formatting.
    fn run_style(
        &mut self,
        block: BlockId,
        paragraph_style: &str,
        cascade: &StyleProperties,
        paragraph: ParagraphFormat,
        run: &SourceRun,
    ) -> String {
        let styles = &self.context.styles;
        let character = match run.style.as_deref() {
            Some(raw) if !styles.contains(raw) => {
                self.context.diagnostics.warn(Diagnostic::UnknownStyle {
                    block,
                    style: raw.to_string(),
                });
                None
            },
            // The paragraph cascade already carries its linked character style.
            Some(raw) if styles.merged_id(raw) == styles.merged_id(paragraph_style) => None,
            Some(raw) => styles.cascade(raw).map(|c| c.run),
            None => None,
        };

        let defaults = styles.defaults().run;
        let format = StyleFormat {
            run: aggregate(&cascade.run, &character.unwrap_or_default(), &defaults)
                .apply(&run.properties),
            paragraph,
            table: None,
        };
        let hint = match run.style.as_deref() {
            Some(raw) if styles.contains(raw) => raw,
            _ => paragraph_style,
        };
        self.context.styles.intern(format, hint)
    }

    /// Recover an index from a literal marker at the start of the text and
    /// strip the marker.
    fn implied_index(
        &mut self,
        block: BlockId,
        style: &str,
        paragraph: &mut Paragraph,
    ) -> Option<Index> {
        let detections = self.context.numbering.detect(&paragraph.text());
        if detections.is_empty() {
            return None;
        }

        let styles = &self.context.styles;
        let leading = paragraph.leading_style();
        let matches = classify(detections, &self.context.numbering, |owner| {
            owner == style || (leading.is_some() && styles.canonical_id(owner) == leading)
        });
        let chosen = select(
            matches,
            self.policy,
            &self.context.numbering,
            &self.context.counters,
        )?;

        let detection = chosen.detection;
        let enumeration = self.context.numbering.get(detection.numbering)?;
        let counters = self
            .context
            .counters
            .seed(enumeration, detection.level, &detection.counters);
        log::debug!(
            "block {block}: implied level {} of numbering {} ({:?})",
            detection.level,
            detection.numbering,
            chosen.kind
        );

        paragraph.strip_prefix(detection.length);
        Some(Index {
            numbering: detection.numbering,
            level: detection.level,
            counters,
            implied: true,
        })
    }

    fn table(&mut self, source: &SourceTable) -> Result<BlockId> {
        let id = self.reserve();
        let style = self.raw_style(
            id,
            source.style.as_deref(),
            StyleRegistry::default_table_style,
        );
        let cascade = self
            .context
            .styles
            .cascade(&style)
            .copied()
            .unwrap_or_default();
        let mut format = cascade.resolve(self.context.styles.defaults());
        format.table = Some(format.table.unwrap_or_default().apply(&source.properties));
        let table_style = self.context.styles.intern(format, &style);

        let mut rows = Vec::with_capacity(source.rows.len());
        for row in &source.rows {
            let mut cells = Vec::with_capacity(row.len());
            for cell in row {
                cells.push(Cell {
                    children: self.sequence(&cell.blocks)?,
                });
            }
            rows.push(cells);
        }

        let block = &mut self.blocks[id.0 as usize];
        block.format = Some(Format {
            style: table_style,
            index: None,
        });
        block.kind = BlockKind::Table(Table { rows });
        Ok(id)
    }
}
