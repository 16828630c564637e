//! Style cascade resolution.
//!
//! Style definitions form a forest per kind through `basedOn`. The resolver
//! builds that forest as an arena (nodes address their parent and children
//! by index), walks it depth-first from every root carrying the accumulated
//! properties, merges mutually linked paragraph/character pairs and hands
//! the result to [`StyleRegistry`] for deduplication.
use super::definition::{StyleDefinition, StyleKind};
use super::properties::{DocumentDefaults, StyleProperties};
use super::registry::{DEFAULT_STYLE_ID, ResolvedStyles, STYLE_ID_SEPARATOR, Style, StyleRegistry};
use crate::common::{Error, Result};
use std::collections::HashMap;

#[derive(Debug)]
struct StyleNode {
    definition: usize,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Resolves style definitions into a [`StyleRegistry`].
///
/// # Examples
///
/// ```rust
/// use litchi_outline::style::{
///     DocumentDefaults, RunProperties, StyleDefinition, StyleKind, StyleResolver,
/// };
///
/// let styles = vec![
///     StyleDefinition::new("Normal", StyleKind::Paragraph).as_default(),
///     StyleDefinition::new("Heading1", StyleKind::Paragraph)
///         .based_on("Normal")
///         .with_run(RunProperties { bold: Some(true), ..Default::default() }),
/// ];
/// let registry = StyleResolver::new(&DocumentDefaults::default(), &styles).resolve()?;
/// assert!(registry.resolve("Heading1").unwrap().format.run.bold);
/// # Ok::<(), litchi_outline::common::Error>(())
/// ```
pub struct StyleResolver<'a> {
    defaults: &'a DocumentDefaults,
    definitions: &'a [StyleDefinition],
}

impl<'a> StyleResolver<'a> {
    /// Create a resolver over the document defaults and style definitions.
    pub fn new(defaults: &'a DocumentDefaults, definitions: &'a [StyleDefinition]) -> Self {
        Self {
            defaults,
            definitions,
        }
    }

    /// Resolve every style.
    ///
    /// # Errors
    ///
    /// - [`Error::DanglingBasedOn`] if a style inherits from an unknown id
    /// - [`Error::BasedOnKindMismatch`] if a style inherits across kinds
    /// - [`Error::CyclicInheritance`] if `basedOn` references form a cycle
    pub fn resolve(&self) -> Result<StyleRegistry> {
        let (nodes, index) = self.build_forest()?;
        let cascades = self.walk(&nodes)?;

        let defaults = self.defaults.resolve();
        let mut resolved = ResolvedStyles {
            defaults,
            ..Default::default()
        };
        resolved.merged.push(Style {
            id: DEFAULT_STYLE_ID.to_string(),
            format: defaults,
        });
        resolved
            .raw_to_merged
            .insert(DEFAULT_STYLE_ID.to_string(), DEFAULT_STYLE_ID.to_string());
        resolved
            .cascades
            .insert(DEFAULT_STYLE_ID.to_string(), StyleProperties::default());

        let partners = self.linked_pairs(&nodes, &index);

        for (idx, node) in nodes.iter().enumerate() {
            let def = &self.definitions[node.definition];
            let acc = cascades[idx];
            resolved.kinds.insert(def.id.clone(), def.kind);
            if def.is_default {
                match def.kind {
                    StyleKind::Paragraph => {
                        resolved
                            .default_paragraph
                            .get_or_insert_with(|| def.id.clone());
                    },
                    StyleKind::Table => {
                        resolved
                            .default_table
                            .get_or_insert_with(|| def.id.clone());
                    },
                    _ => {},
                }
            }

            match partners.get(&idx) {
                // The paragraph side registers the merged style.
                Some(_) if def.kind == StyleKind::Character => {
                    resolved.cascades.insert(def.id.clone(), acc);
                },
                Some(&partner) => {
                    let companion = &self.definitions[nodes[partner].definition];
                    let merged = StyleProperties {
                        run: acc.run.overlay(&cascades[partner].run),
                        ..acc
                    };
                    let id = format!("{}{}{}", def.id, STYLE_ID_SEPARATOR, companion.id);
                    resolved.raw_to_merged.insert(def.id.clone(), id.clone());
                    resolved
                        .raw_to_merged
                        .insert(companion.id.clone(), id.clone());
                    resolved.cascades.insert(def.id.clone(), merged);
                    resolved.merged.push(Style {
                        id,
                        format: merged.resolve(&defaults),
                    });
                },
                None => {
                    resolved
                        .raw_to_merged
                        .insert(def.id.clone(), def.id.clone());
                    resolved.cascades.insert(def.id.clone(), acc);
                    resolved.merged.push(Style {
                        id: def.id.clone(),
                        format: acc.resolve(&defaults),
                    });
                },
            }
        }

        let registry = StyleRegistry::new(resolved);
        log::debug!(
            "resolved {} style definitions into {} effective styles",
            nodes.len(),
            registry.len()
        );
        Ok(registry)
    }

    /// Build the inheritance arena. Duplicate ids keep their first definition.
    fn build_forest(&self) -> Result<(Vec<StyleNode>, HashMap<&'a str, usize>)> {
        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(self.definitions.len());
        let mut nodes = Vec::with_capacity(self.definitions.len());

        for (i, def) in self.definitions.iter().enumerate() {
            if index.contains_key(def.id.as_str()) {
                log::debug!("duplicate style id '{}' ignored", def.id);
                continue;
            }
            index.insert(def.id.as_str(), nodes.len());
            nodes.push(StyleNode {
                definition: i,
                parent: None,
                children: Vec::new(),
            });
        }

        for idx in 0..nodes.len() {
            let def = &self.definitions[nodes[idx].definition];
            let Some(parent_id) = def.based_on.as_deref() else {
                continue;
            };
            let &parent = index.get(parent_id).ok_or_else(|| Error::DanglingBasedOn {
                style: def.id.clone(),
                parent: parent_id.to_string(),
            })?;
            let parent_def = &self.definitions[nodes[parent].definition];
            if parent_def.kind != def.kind {
                return Err(Error::BasedOnKindMismatch {
                    style: def.id.clone(),
                    kind: def.kind.to_string(),
                    parent: parent_def.id.clone(),
                    parent_kind: parent_def.kind.to_string(),
                });
            }
            nodes[idx].parent = Some(parent);
            nodes[parent].children.push(idx);
        }

        Ok((nodes, index))
    }

    /// Depth-first walk from every root, accumulating properties down each chain.
    fn walk(&self, nodes: &[StyleNode]) -> Result<Vec<StyleProperties>> {
        let mut cascades: Vec<Option<StyleProperties>> = vec![None; nodes.len()];
        let mut stack: Vec<(usize, StyleProperties)> = nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| (idx, StyleProperties::default()))
            .collect();

        while let Some((idx, inherited)) = stack.pop() {
            let node = &nodes[idx];
            let acc = inherited.cascade(&self.definitions[node.definition].properties);
            for &child in node.children.iter().rev() {
                stack.push((child, acc));
            }
            cascades[idx] = Some(acc);
        }

        // Nodes unreachable from any root sit on a basedOn cycle.
        let mut resolved = Vec::with_capacity(nodes.len());
        let mut cyclic = Vec::new();
        for (idx, acc) in cascades.into_iter().enumerate() {
            match acc {
                Some(acc) => resolved.push(acc),
                None => cyclic.push(self.definitions[nodes[idx].definition].id.clone()),
            }
        }
        if !cyclic.is_empty() {
            return Err(Error::CyclicInheritance(cyclic));
        }
        Ok(resolved)
    }

    /// Paragraph/character pairs whose `w:link` elements name each other.
    /// The map holds both directions.
    fn linked_pairs(
        &self,
        nodes: &[StyleNode],
        index: &HashMap<&'a str, usize>,
    ) -> HashMap<usize, usize> {
        let mut partners = HashMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            let def = &self.definitions[node.definition];
            if def.kind != StyleKind::Paragraph {
                continue;
            }
            let Some(&other) = def.link.as_deref().and_then(|link| index.get(link)) else {
                continue;
            };
            let companion = &self.definitions[nodes[other].definition];
            if companion.kind == StyleKind::Character
                && companion.link.as_deref() == Some(def.id.as_str())
                && !partners.contains_key(&other)
            {
                partners.insert(idx, other);
                partners.insert(other, idx);
            }
        }
        partners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::properties::{RunProperties, TableProperties};

    fn run(font_size: Option<u32>, bold: Option<bool>) -> RunProperties {
        RunProperties {
            font_size,
            bold,
            ..Default::default()
        }
    }

    fn resolve(defaults: &DocumentDefaults, styles: &[StyleDefinition]) -> Result<StyleRegistry> {
        StyleResolver::new(defaults, styles).resolve()
    }

    #[test]
    fn test_bold_default_survives_empty_chain() {
        let defaults = DocumentDefaults {
            run: run(None, Some(true)),
            ..Default::default()
        };
        let styles = vec![
            StyleDefinition::new("A", StyleKind::Paragraph).with_run(run(Some(24), None)),
            StyleDefinition::new("B", StyleKind::Paragraph)
                .based_on("A")
                .with_run(run(Some(28), None)),
        ];
        let registry = resolve(&defaults, &styles).unwrap();
        assert!(registry.resolve("B").unwrap().format.run.bold);
    }

    #[test]
    fn test_bold_flip_in_parent_reaches_child() {
        let defaults = DocumentDefaults {
            run: run(None, Some(true)),
            ..Default::default()
        };
        let styles = vec![
            StyleDefinition::new("A", StyleKind::Paragraph).with_run(run(None, Some(true))),
            StyleDefinition::new("B", StyleKind::Paragraph)
                .based_on("A")
                .with_run(run(Some(30), None)),
        ];
        let registry = resolve(&defaults, &styles).unwrap();
        assert!(!registry.resolve("A").unwrap().format.run.bold);
        assert!(!registry.resolve("B").unwrap().format.run.bold);
    }

    #[test]
    fn test_children_defined_before_parents() {
        let styles = vec![
            StyleDefinition::new("Child", StyleKind::Paragraph).based_on("Parent"),
            StyleDefinition::new("Parent", StyleKind::Paragraph).with_run(run(Some(40), None)),
        ];
        let registry = resolve(&DocumentDefaults::default(), &styles).unwrap();
        // Equal formats collapse into one canonical style.
        assert_eq!(registry.canonical_id("Child"), Some("Child|Parent"));
        assert_eq!(registry.resolve("Parent").unwrap().format.run.font_size, 40);
    }

    #[test]
    fn test_dangling_based_on_is_fatal() {
        let styles = vec![StyleDefinition::new("Orphan", StyleKind::Paragraph).based_on("Ghost")];
        let err = resolve(&DocumentDefaults::default(), &styles).unwrap_err();
        assert!(matches!(
            err,
            Error::DanglingBasedOn { ref style, ref parent } if style == "Orphan" && parent == "Ghost"
        ));
    }

    #[test]
    fn test_based_on_other_kind_is_fatal() {
        let styles = vec![
            StyleDefinition::new("Emphasis", StyleKind::Character),
            StyleDefinition::new("Quote", StyleKind::Paragraph).based_on("Emphasis"),
        ];
        let err = resolve(&DocumentDefaults::default(), &styles).unwrap_err();
        assert!(matches!(err, Error::BasedOnKindMismatch { .. }));
    }

    #[test]
    fn test_cyclic_based_on_is_fatal() {
        let styles = vec![
            StyleDefinition::new("Root", StyleKind::Paragraph),
            StyleDefinition::new("X", StyleKind::Paragraph).based_on("Y"),
            StyleDefinition::new("Y", StyleKind::Paragraph).based_on("X"),
        ];
        let err = resolve(&DocumentDefaults::default(), &styles).unwrap_err();
        match err {
            Error::CyclicInheritance(ids) => assert_eq!(ids, vec!["X", "Y"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_linked_styles_merge_with_character_precedence() {
        let styles = vec![
            StyleDefinition::new("Heading1", StyleKind::Paragraph)
                .linked_to("Heading1Char")
                .with_run(run(Some(32), Some(true))),
            StyleDefinition::new("Heading1Char", StyleKind::Character)
                .linked_to("Heading1")
                .with_run(run(Some(36), None)),
            StyleDefinition::new("Strong", StyleKind::Character).with_run(run(None, Some(true))),
        ];
        let registry = resolve(&DocumentDefaults::default(), &styles).unwrap();

        assert_eq!(registry.merged_id("Heading1"), Some("Heading1|Heading1Char"));
        assert_eq!(registry.merged_id("Heading1Char"), Some("Heading1|Heading1Char"));
        let merged = registry.resolve("Heading1Char").unwrap();
        assert_eq!(merged.format.run.font_size, 36);
        assert!(merged.format.run.bold);

        // Unlinked character styles stay standalone.
        assert_eq!(registry.merged_id("Strong"), Some("Strong"));
    }

    #[test]
    fn test_one_sided_link_does_not_merge() {
        let styles = vec![
            StyleDefinition::new("Quote", StyleKind::Paragraph).linked_to("QuoteChar"),
            StyleDefinition::new("QuoteChar", StyleKind::Character).with_run(run(Some(18), None)),
        ];
        let registry = resolve(&DocumentDefaults::default(), &styles).unwrap();
        assert_eq!(registry.merged_id("Quote"), Some("Quote"));
    }

    #[test]
    fn test_defaults_and_table_styles() {
        let styles = vec![
            StyleDefinition::new("Normal", StyleKind::Paragraph)
                .as_default()
                .with_run(run(Some(22), None)),
            StyleDefinition::new("TableGrid", StyleKind::Table)
                .as_default()
                .with_table(TableProperties {
                    indentation: Some(108),
                    ..Default::default()
                }),
        ];
        let registry = resolve(&DocumentDefaults::default(), &styles).unwrap();
        assert_eq!(registry.default_paragraph_style(), "Normal");
        assert_eq!(registry.default_table_style(), "TableGrid");
        let table = registry.resolve("TableGrid").unwrap();
        assert_eq!(table.format.table.map(|t| t.indentation), Some(108));
        assert!(registry.contains(DEFAULT_STYLE_ID));
    }

    #[test]
    fn test_no_two_canonical_styles_are_equal() {
        let styles = vec![
            StyleDefinition::new("A", StyleKind::Paragraph).with_run(run(Some(22), None)),
            StyleDefinition::new("B", StyleKind::Paragraph).with_run(run(Some(22), None)),
            StyleDefinition::new("C", StyleKind::Character),
        ];
        let registry = resolve(&DocumentDefaults::default(), &styles).unwrap();
        let formats: Vec<_> = registry.iter().map(|s| s.format).collect();
        for (i, a) in formats.iter().enumerate() {
            for b in &formats[i + 1..] {
                assert_ne!(a, b);
            }
        }
        // "C" states nothing and matches the document defaults.
        assert_eq!(registry.canonical_id("C"), Some("docDefaults|C"));
    }
}
