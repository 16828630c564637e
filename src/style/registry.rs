//! Effective, deduplicated styles and the lookups into them.
use super::definition::StyleKind;
use super::properties::{StyleFormat, StyleProperties};
use serde::Serialize;
use std::collections::HashMap;

/// Separator between member ids in merged and canonical style ids.
pub const STYLE_ID_SEPARATOR: char = '|';

/// Id of the synthetic style holding the document defaults.
pub const DEFAULT_STYLE_ID: &str = "docDefaults";

/// An effective style.
///
/// The id of a canonical style is the ordered union of the raw ids it
/// stands for, joined with [`STYLE_ID_SEPARATOR`] (e.g. `"Heading1|Heading1Char"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Style {
    /// Style id
    pub id: String,
    /// Fully resolved formatting
    pub format: StyleFormat,
}

impl Style {
    /// Iterate over the raw style ids this style stands for.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.id.split(STYLE_ID_SEPARATOR)
    }
}

/// Group styles with structurally equal formats into canonical styles.
///
/// Returns the canonical styles in order of first appearance and a map from
/// every input id to its canonical id. Running this on its own output is a
/// no-op: every group then has exactly one member.
pub fn deduplicate(styles: Vec<Style>) -> (Vec<Style>, HashMap<String, String>) {
    let mut groups: Vec<(Vec<String>, StyleFormat)> = Vec::new();
    let mut by_format: HashMap<StyleFormat, usize> = HashMap::with_capacity(styles.len());

    for style in styles {
        let group = *by_format.entry(style.format).or_insert_with(|| {
            groups.push((Vec::new(), style.format));
            groups.len() - 1
        });
        groups[group].0.push(style.id);
    }

    let mut canonical = Vec::with_capacity(groups.len());
    let mut mapping = HashMap::new();
    for (members, format) in groups {
        let mut parts: Vec<&str> = Vec::new();
        for member in &members {
            for part in member.split(STYLE_ID_SEPARATOR) {
                if !parts.contains(&part) {
                    parts.push(part);
                }
            }
        }
        let separator = STYLE_ID_SEPARATOR.to_string();
        let id = parts.join(&separator);
        for member in members {
            mapping.insert(member, id.clone());
        }
        canonical.push(Style { id, format });
    }

    (canonical, mapping)
}

/// All effective styles of a document.
///
/// Any raw style id resolves to its canonical style in two map lookups:
/// raw id → merged id (linked pairs share one merged id) and merged id →
/// canonical id.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    defaults: StyleFormat,
    styles: Vec<Style>,
    by_id: HashMap<String, usize>,
    by_format: HashMap<StyleFormat, usize>,
    raw_to_merged: HashMap<String, String>,
    merged_to_canonical: HashMap<String, String>,
    cascades: HashMap<String, StyleProperties>,
    kinds: HashMap<String, StyleKind>,
    default_paragraph: Option<String>,
    default_table: Option<String>,
    interned: usize,
}

/// Output of the cascade walk, turned into a registry by [`StyleRegistry::new`].
#[derive(Debug, Default)]
pub(crate) struct ResolvedStyles {
    pub defaults: StyleFormat,
    pub merged: Vec<Style>,
    pub raw_to_merged: HashMap<String, String>,
    pub cascades: HashMap<String, StyleProperties>,
    pub kinds: HashMap<String, StyleKind>,
    pub default_paragraph: Option<String>,
    pub default_table: Option<String>,
}

impl StyleRegistry {
    pub(crate) fn new(resolved: ResolvedStyles) -> Self {
        let (styles, merged_to_canonical) = deduplicate(resolved.merged);

        let mut by_id = HashMap::with_capacity(styles.len());
        let mut by_format = HashMap::with_capacity(styles.len());
        for (i, style) in styles.iter().enumerate() {
            by_id.insert(style.id.clone(), i);
            by_format.insert(style.format, i);
        }

        Self {
            defaults: resolved.defaults,
            styles,
            by_id,
            by_format,
            raw_to_merged: resolved.raw_to_merged,
            merged_to_canonical,
            cascades: resolved.cascades,
            kinds: resolved.kinds,
            default_paragraph: resolved.default_paragraph,
            default_table: resolved.default_table,
            interned: 0,
        }
    }

    /// Effective formatting of the document defaults.
    #[inline]
    pub fn defaults(&self) -> &StyleFormat {
        &self.defaults
    }

    /// Number of canonical styles.
    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if there are no canonical styles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over the canonical styles.
    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    /// Get a canonical style by its canonical id.
    pub fn get(&self, canonical_id: &str) -> Option<&Style> {
        self.by_id.get(canonical_id).map(|&i| &self.styles[i])
    }

    /// Merged id of a raw style id (differs from the raw id for linked pairs).
    pub fn merged_id(&self, raw_id: &str) -> Option<&str> {
        self.raw_to_merged.get(raw_id).map(String::as_str)
    }

    /// Canonical id for a raw or merged style id.
    pub fn canonical_id(&self, id: &str) -> Option<&str> {
        let merged = self.raw_to_merged.get(id).map_or(id, String::as_str);
        self.merged_to_canonical.get(merged).map(String::as_str)
    }

    /// The canonical style a raw style id resolves to.
    pub fn resolve(&self, raw_id: &str) -> Option<&Style> {
        self.canonical_id(raw_id).and_then(|id| self.get(id))
    }

    /// The accumulated (not yet anchored) properties of a raw style's chain.
    ///
    /// For the paragraph side of a linked pair this already includes the
    /// companion character style's run properties.
    pub fn cascade(&self, raw_id: &str) -> Option<&StyleProperties> {
        self.cascades.get(raw_id)
    }

    /// Kind of a raw style.
    pub fn kind(&self, raw_id: &str) -> Option<StyleKind> {
        self.kinds.get(raw_id).copied()
    }

    /// Check if a raw style id is defined.
    pub fn contains(&self, raw_id: &str) -> bool {
        self.cascades.contains_key(raw_id)
    }

    /// Raw id paragraphs without `w:pStyle` use.
    pub fn default_paragraph_style(&self) -> &str {
        self.default_paragraph.as_deref().unwrap_or(DEFAULT_STYLE_ID)
    }

    /// Raw id tables without `w:tblStyle` use.
    pub fn default_table_style(&self) -> &str {
        self.default_table.as_deref().unwrap_or(DEFAULT_STYLE_ID)
    }

    /// Canonical id for an effective format, registering a new canonical
    /// style only if no structurally equal one exists.
    ///
    /// `hint` names the raw style the format was derived from; it seeds the
    /// id of a newly registered style.
    pub fn intern(&mut self, format: StyleFormat, hint: &str) -> String {
        if let Some(&i) = self.by_format.get(&format) {
            return self.styles[i].id.clone();
        }

        self.interned += 1;
        let id = format!("{hint}*{}", self.interned);
        let i = self.styles.len();
        self.by_format.insert(format, i);
        self.by_id.insert(id.clone(), i);
        self.merged_to_canonical.insert(id.clone(), id.clone());
        self.styles.push(Style {
            id: id.clone(),
            format,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::properties::RunFormat;

    fn sized(id: &str, font_size: u32) -> Style {
        Style {
            id: id.to_string(),
            format: StyleFormat {
                run: RunFormat {
                    font_size,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_deduplicate_groups_equal_formats() {
        let (styles, mapping) = deduplicate(vec![
            sized("Normal", 22),
            sized("Heading1|Heading1Char", 32),
            sized("BodyText", 22),
            sized("Title", 32),
        ]);

        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].id, "Normal|BodyText");
        assert_eq!(styles[1].id, "Heading1|Heading1Char|Title");
        assert_eq!(mapping["BodyText"], "Normal|BodyText");
        assert_eq!(mapping["Heading1|Heading1Char"], "Heading1|Heading1Char|Title");
    }

    #[test]
    fn test_deduplicate_is_idempotent() {
        let (once, _) = deduplicate(vec![
            sized("A", 20),
            sized("B", 20),
            sized("C", 24),
        ]);
        let (twice, mapping) = deduplicate(once.clone());

        assert_eq!(once, twice);
        for style in &twice {
            assert_eq!(mapping[&style.id], style.id);
        }
    }

    #[test]
    fn test_intern_reuses_equal_formats() {
        let mut registry = StyleRegistry::new(ResolvedStyles {
            merged: vec![sized(DEFAULT_STYLE_ID, 20), sized("Normal", 22)],
            ..Default::default()
        });

        assert_eq!(registry.intern(sized("x", 22).format, "Normal"), "Normal");
        let fresh = registry.intern(sized("x", 30).format, "Normal");
        assert_eq!(fresh, "Normal*1");
        assert_eq!(registry.intern(sized("x", 30).format, "Other"), "Normal*1");
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("Normal*1").map(|s| s.format.run.font_size), Some(30));
    }
}
