//! Numbering resolution: templates, style links and instance overrides.
use super::definition::{AbstractNumberingDefinition, LevelDefinition, NumberingDefinition};
use super::enumeration::{Detection, Enumeration};
use super::level::{AbstractNumberingId, Level, LevelId, NumberingId};
use crate::common::{Diagnostic, Diagnostics, Error, Result};
use crate::style::{StyleFormat, StyleRegistry};
use std::collections::{BTreeMap, HashMap};

/// Resolves numbering definitions into a [`NumberingRegistry`].
pub struct NumberingResolver<'a> {
    abstracts: &'a [AbstractNumberingDefinition],
    numberings: &'a [NumberingDefinition],
    styles: &'a StyleRegistry,
}

impl<'a> NumberingResolver<'a> {
    /// Create a resolver over the raw definitions.
    ///
    /// `styles` supplies the numbering styles `w:numStyleLink` goes through
    /// and the formats of the paragraph styles owning levels.
    pub fn new(
        abstracts: &'a [AbstractNumberingDefinition],
        numberings: &'a [NumberingDefinition],
        styles: &'a StyleRegistry,
    ) -> Self {
        Self {
            abstracts,
            numberings,
            styles,
        }
    }

    /// Resolve one [`Enumeration`] per numbering instance.
    ///
    /// Instances bound to an unknown template and overrides of levels the
    /// template lacks are reported to `diagnostics`.
    ///
    /// # Errors
    ///
    /// - [`Error::NumberingLinkCycle`] if `w:numStyleLink` references lead
    ///   back to a template already visited
    /// - [`Error::OverrideLevelMismatch`] if an override embeds a definition
    ///   of another level
    pub fn resolve(&self, diagnostics: &mut Diagnostics) -> Result<NumberingRegistry> {
        let templates: HashMap<AbstractNumberingId, &AbstractNumberingDefinition> =
            self.abstracts.iter().map(|a| (a.id, a)).collect();
        let instances: HashMap<NumberingId, AbstractNumberingId> = self
            .numberings
            .iter()
            .map(|n| (n.id, n.abstract_id))
            .collect();
        let links = self.links(&instances);

        let mut registry = NumberingRegistry {
            enumerations: BTreeMap::new(),
            owners: self
                .abstracts
                .iter()
                .map(|a| {
                    let owners = a.levels.iter().map(|l| (l.id, l.style.clone())).collect();
                    (a.id, owners)
                })
                .collect(),
            links,
        };

        // Surface link cycles even for templates no instance uses.
        for definition in self.abstracts {
            registry.template_levels(definition.id, &templates)?;
        }

        for numbering in self.numberings {
            if !templates.contains_key(&numbering.abstract_id) {
                diagnostics.warn(Diagnostic::UnknownAbstractNumbering {
                    numbering: numbering.id,
                    abstract_numbering: numbering.abstract_id,
                });
                continue;
            }
            let template = registry.template_levels(numbering.abstract_id, &templates)?;
            let levels = self.apply_overrides(numbering, template, diagnostics)?;
            let enumeration = Enumeration::new(
                numbering.id,
                numbering.abstract_id,
                levels.into_values().map(|definition| self.level(definition)),
            )?;
            registry.enumerations.insert(numbering.id, enumeration);
        }

        log::debug!(
            "resolved {} numbering instances over {} templates",
            registry.enumerations.len(),
            self.abstracts.len()
        );
        Ok(registry)
    }

    /// Parent-link targets: the template each `w:numStyleLink` resolves to.
    ///
    /// The template defining the numbering style (`w:styleLink`) wins; the
    /// numbering style's own `w:numPr` instance is the fallback.
    fn links(
        &self,
        instances: &HashMap<NumberingId, AbstractNumberingId>,
    ) -> HashMap<AbstractNumberingId, AbstractNumberingId> {
        let mut links = HashMap::new();
        for definition in self.abstracts {
            let Some(link) = definition.style_link.as_deref() else {
                continue;
            };
            let target = self
                .abstracts
                .iter()
                .find(|other| other.id != definition.id && other.num_style.as_deref() == Some(link))
                .map(|other| other.id)
                .or_else(|| {
                    self.styles
                        .cascade(link)
                        .and_then(|cascade| cascade.paragraph.numbering)
                        .and_then(|reference| reference.id)
                        .filter(|&id| id != 0)
                        .and_then(|id| instances.get(&id).copied())
                });
            match target {
                Some(target) => {
                    links.insert(definition.id, target);
                },
                None => log::warn!(
                    "abstract numbering {} links to numbering style '{}' which binds no numbering",
                    definition.id,
                    link
                ),
            }
        }
        links
    }

    fn apply_overrides(
        &self,
        numbering: &NumberingDefinition,
        template: BTreeMap<LevelId, &'a LevelDefinition>,
        diagnostics: &mut Diagnostics,
    ) -> Result<BTreeMap<LevelId, LevelDefinition>> {
        let mut levels: BTreeMap<LevelId, LevelDefinition> = template
            .iter()
            .map(|(&id, &definition)| (id, definition.clone()))
            .collect();

        for level_override in &numbering.overrides {
            if let Some(definition) = &level_override.definition {
                if definition.id != level_override.level {
                    return Err(Error::OverrideLevelMismatch {
                        numbering: numbering.id,
                        level: level_override.level,
                        embedded: definition.id,
                    });
                }
            }
            if !template.contains_key(&level_override.level) {
                diagnostics.warn(Diagnostic::OverrideLevelMissing {
                    numbering: numbering.id,
                    level: level_override.level,
                });
            }
            if let Some(definition) = &level_override.definition {
                levels.insert(level_override.level, definition.clone());
            }
            if let Some(start) = level_override.start {
                if let Some(level) = levels.get_mut(&level_override.level) {
                    level.properties.override_start = Some(start);
                }
            }
        }
        Ok(levels)
    }

    fn level(&self, definition: LevelDefinition) -> Level {
        let base = definition
            .style
            .as_deref()
            .and_then(|style| self.styles.resolve(style))
            .or_else(|| self.styles.resolve(self.styles.default_paragraph_style()))
            .map_or(*self.styles.defaults(), |style| style.format);
        // The level's rPr formats the marker glyph only.
        Level {
            id: definition.id,
            format: StyleFormat {
                run: base.run,
                paragraph: base.paragraph.apply(&definition.paragraph),
                table: None,
            },
            properties: definition.properties,
            style: definition.style,
            paragraph: definition.paragraph,
        }
    }
}

/// Effective numbering of a document.
#[derive(Debug, Clone, Default)]
pub struct NumberingRegistry {
    enumerations: BTreeMap<NumberingId, Enumeration>,
    /// Owning style of every level a template itself defines
    owners: HashMap<AbstractNumberingId, Vec<(LevelId, Option<String>)>>,
    /// Parent-link association of templates using `w:numStyleLink`
    links: HashMap<AbstractNumberingId, AbstractNumberingId>,
}

impl NumberingRegistry {
    /// Get the enumeration of a numbering instance.
    #[inline]
    pub fn get(&self, numbering: NumberingId) -> Option<&Enumeration> {
        self.enumerations.get(&numbering)
    }

    /// Iterate over the enumerations in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Enumeration> {
        self.enumerations.values()
    }

    /// Number of resolved instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.enumerations.len()
    }

    /// Check if no instance was resolved.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.enumerations.is_empty()
    }

    /// Consume the registry, returning the enumerations.
    pub fn into_enumerations(self) -> BTreeMap<NumberingId, Enumeration> {
        self.enumerations
    }

    /// Every level, across all enumerations, whose marker `text` starts with.
    pub fn detect(&self, text: &str) -> Vec<Detection> {
        self.enumerations
            .values()
            .flat_map(|enumeration| enumeration.detect(text))
            .collect()
    }

    /// Levels of a template with its parent link resolved, own levels
    /// overlaid on the linked ones.
    fn template_levels<'d>(
        &self,
        abstract_id: AbstractNumberingId,
        templates: &HashMap<AbstractNumberingId, &'d AbstractNumberingDefinition>,
    ) -> Result<BTreeMap<LevelId, &'d LevelDefinition>> {
        let mut chain = Vec::new();
        let mut current = Some(abstract_id);
        while let Some(id) = current {
            if chain.contains(&id) {
                chain.push(id);
                return Err(Error::NumberingLinkCycle(chain));
            }
            chain.push(id);
            current = self.links.get(&id).copied();
        }

        // Apply from the farthest ancestor down so nearer templates win.
        let mut levels = BTreeMap::new();
        for id in chain.iter().rev() {
            if let Some(template) = templates.get(id) {
                for level in &template.levels {
                    levels.insert(level.id, level);
                }
            }
        }
        Ok(levels)
    }

    /// Find the level a style occupies in a numbering instance.
    ///
    /// Looks for a level owned by `style` in the instance's effective levels,
    /// then along the template's parent links. `Ok(None)` means no level
    /// names the style; callers fall back to level 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NumberingLinkCycle`] if the parent links revisit a
    /// template.
    pub fn find_style_level(&self, numbering: NumberingId, style: &str) -> Result<Option<LevelId>> {
        let Some(enumeration) = self.enumerations.get(&numbering) else {
            return Ok(None);
        };
        if let Some(level) = enumeration
            .levels()
            .find(|level| level.style.as_deref() == Some(style))
        {
            return Ok(Some(level.id));
        }

        let mut visited = Vec::new();
        let mut current = Some(enumeration.abstract_id);
        while let Some(id) = current {
            if visited.contains(&id) {
                visited.push(id);
                return Err(Error::NumberingLinkCycle(visited));
            }
            visited.push(id);
            let owned = self.owners.get(&id).and_then(|owners| {
                owners
                    .iter()
                    .find(|(_, owner)| owner.as_deref() == Some(style))
                    .map(|(level, _)| *level)
            });
            if owned.is_some() {
                return Ok(owned);
            }
            current = self.links.get(&id).copied();
        }
        Ok(None)
    }
}
