//! Read-only view of an outlined document.
use super::block::{Block, BlockId, BlockKind};
use crate::common::Diagnostic;
use crate::context::ResolutionContext;
use crate::numbering::{Enumeration, NumberingId};
use crate::style::Style;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// The outline tree with the styles and enumerations it refers to.
///
/// # Examples
///
/// ```rust
/// use litchi_outline::document::{SourceDocument, SourceParagraph};
/// use litchi_outline::hierarchy::{HierarchyOptions, NumberingConflict};
///
/// let source = SourceDocument {
///     body: vec![SourceParagraph::with_text(None, "Hello").into()],
///     ..Default::default()
/// };
/// let view = litchi_outline::outline(&source, &HierarchyOptions::new(NumberingConflict::Fail))?;
///
/// for (block, depth) in view.depth_first() {
///     println!("{}{}", "  ".repeat(depth), view.text(block.id).unwrap_or_default());
/// }
/// # Ok::<(), litchi_outline::common::Error>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    blocks: BTreeMap<BlockId, Block>,
    root: Block,
    styles: Vec<Style>,
    #[serde(skip)]
    style_index: HashMap<String, usize>,
    enumerations: BTreeMap<NumberingId, Enumeration>,
    diagnostics: Vec<Diagnostic>,
}

impl DocumentView {
    /// Assemble a view from the hierarchized blocks and the context they
    /// were resolved in.
    pub fn new(root: Block, blocks: Vec<Block>, context: ResolutionContext) -> Self {
        let styles: Vec<Style> = context.styles.iter().cloned().collect();
        let style_index = styles
            .iter()
            .enumerate()
            .map(|(i, style)| (style.id.clone(), i))
            .collect();
        Self {
            blocks: blocks.into_iter().map(|block| (block.id, block)).collect(),
            root,
            styles,
            style_index,
            enumerations: context.numbering.into_enumerations(),
            diagnostics: context.diagnostics.into_vec(),
        }
    }

    /// The synthetic root.
    #[inline]
    pub fn root(&self) -> &Block {
        &self.root
    }

    /// Get a block; [`BlockId::ROOT`] yields the root.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        if id.is_root() {
            Some(&self.root)
        } else {
            self.blocks.get(&id)
        }
    }

    /// Iterate over every block except the root, in id order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Number of blocks, root excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Children of a block. A table's children are the top blocks of its
    /// cells in row-major order.
    pub fn children(&self, id: BlockId) -> impl Iterator<Item = &Block> {
        self.block(id)
            .into_iter()
            .flat_map(|block| block.children.iter())
            .filter_map(|child| self.blocks.get(child))
    }

    /// Parent of a block.
    pub fn parent(&self, id: BlockId) -> Option<&Block> {
        self.block(id)
            .and_then(|block| block.parent)
            .and_then(|parent| self.block(parent))
    }

    /// Text of a paragraph.
    pub fn text(&self, id: BlockId) -> Option<String> {
        match &self.block(id)?.kind {
            BlockKind::Paragraph(paragraph) => Some(paragraph.text()),
            _ => None,
        }
    }

    /// Literal marker of an indexed block (e.g. `"3.2.1)"`), without the
    /// trailing whitespace.
    pub fn marker(&self, id: BlockId) -> Option<String> {
        let index = self.block(id)?.index()?;
        self.enumerations
            .get(&index.numbering)
            .map(|enumeration| enumeration.format(&index.counters))
    }

    /// The effective style of a block.
    pub fn style(&self, id: BlockId) -> Option<&Style> {
        let style = self.block(id)?.style()?;
        self.style_index.get(style).map(|&i| &self.styles[i])
    }

    /// The enumeration an indexed block belongs to.
    pub fn enumeration(&self, id: BlockId) -> Option<&Enumeration> {
        let index = self.block(id)?.index()?;
        self.enumerations.get(&index.numbering)
    }

    /// Canonical styles.
    #[inline]
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Enumerations per numbering instance.
    #[inline]
    pub fn enumerations(&self) -> &BTreeMap<NumberingId, Enumeration> {
        &self.enumerations
    }

    /// Non-fatal diagnostics raised while resolving.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Pre-order traversal with depths, root excluded. Top-level blocks
    /// have depth 0; table cell contents follow their table one level
    /// deeper, cell by cell.
    pub fn depth_first(&self) -> Vec<(&Block, usize)> {
        let mut order = Vec::with_capacity(self.blocks.len());
        let mut stack: Vec<(BlockId, usize)> =
            self.root.children.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(block) = self.blocks.get(&id) else {
                continue;
            };
            order.push((block, depth));

            for &child in block.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{SourceCell, SourceDocument, SourceParagraph, SourceTable};
    use crate::hierarchy::{HierarchyOptions, NumberingConflict};
    use crate::style::{RunProperties, StyleDefinition, StyleKind};

    fn document() -> SourceDocument {
        let cell = |text: &str| SourceCell {
            blocks: vec![SourceParagraph::with_text(None, text).into()],
        };
        SourceDocument {
            styles: vec![
                StyleDefinition::new("Normal", StyleKind::Paragraph).as_default(),
                StyleDefinition::new("Title", StyleKind::Paragraph)
                    .based_on("Normal")
                    .with_run(RunProperties {
                        font_size: Some(48),
                        ..Default::default()
                    }),
            ],
            body: vec![
                SourceParagraph::with_text(Some("Title"), "Report").into(),
                SourceTable {
                    rows: vec![vec![cell("a"), cell("b")], vec![cell("c")]],
                    ..Default::default()
                }
                .into(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_table_cells_visited_once() {
        let view =
            crate::outline(&document(), &HierarchyOptions::new(NumberingConflict::Fail)).unwrap();
        let order = view.depth_first();
        let (table, depth) = order.iter().find(|(block, _)| block.is_table()).copied().unwrap();
        let cells: Vec<(String, usize)> = order
            .iter()
            .filter(|(block, _)| block.parent == Some(table.id))
            .map(|(block, depth)| (view.text(block.id).unwrap_or_default(), *depth))
            .collect();
        assert_eq!(
            cells,
            vec![
                ("a".to_string(), depth + 1),
                ("b".to_string(), depth + 1),
                ("c".to_string(), depth + 1),
            ]
        );
        assert_eq!(order.len(), view.len());
        assert_eq!(view.children(table.id).count(), 3);
    }

    #[test]
    fn test_style_lookup_by_id() {
        let view =
            crate::outline(&document(), &HierarchyOptions::new(NumberingConflict::Fail)).unwrap();
        let title = view.root().children[0];
        let style = view.style(title).unwrap();
        assert_eq!(Some(style.id.as_str()), view.block(title).unwrap().style());
        assert!(view.styles().contains(style));

        for block in view.blocks() {
            if let Some(id) = block.style() {
                assert_eq!(view.style(block.id).map(|s| s.id.as_str()), Some(id));
            }
        }
    }
}
