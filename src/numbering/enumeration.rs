//! Effective, override-resolved level maps of numbering instances.
use super::level::{AbstractNumberingId, Counters, Level, LevelId, NumberingId};
use super::marker::MarkerType;
use super::pattern::Segment;
use crate::common::Result;
use regex::Regex;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Compiled marker recognizer of one level.
#[derive(Debug, Clone)]
struct Detector {
    level: LevelId,
    regex: Regex,
    /// Level each capture group holds, in group order
    groups: SmallVec<[LevelId; 4]>,
}

/// A level whose marker was recognized at the start of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Numbering instance
    pub numbering: NumberingId,
    /// Matched level
    pub level: LevelId,
    /// Length in bytes of the matched marker, trailing whitespace included
    pub length: usize,
    /// Counter values recovered from the marker, for levels up to `level`
    pub counters: Counters,
}

/// The effective view of one numbering instance.
///
/// Detection regexes are compiled once, when the enumeration is built.
#[derive(Debug, Clone, Serialize)]
pub struct Enumeration {
    /// Numbering instance id
    pub id: NumberingId,
    /// Template the levels come from
    pub abstract_id: AbstractNumberingId,
    levels: BTreeMap<LevelId, Level>,
    #[serde(skip)]
    detectors: Vec<Detector>,
}

impl Enumeration {
    /// Build an enumeration and compile its detectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`](crate::common::Error::InvalidPattern)
    /// if a detector fails to compile.
    pub fn new(
        id: NumberingId,
        abstract_id: AbstractNumberingId,
        levels: impl IntoIterator<Item = Level>,
    ) -> Result<Self> {
        let levels: BTreeMap<LevelId, Level> = levels.into_iter().map(|l| (l.id, l)).collect();
        let mut enumeration = Self {
            id,
            abstract_id,
            levels,
            detectors: Vec::new(),
        };
        enumeration.detectors = enumeration.compile_detectors()?;
        Ok(enumeration)
    }

    /// Get a level.
    #[inline]
    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(&id)
    }

    /// Iterate over the levels in id order.
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.values()
    }

    /// Iterate over the levels deeper than `level`.
    pub fn deeper(&self, level: LevelId) -> impl Iterator<Item = &Level> {
        self.levels
            .range((std::ops::Bound::Excluded(level), std::ops::Bound::Unbounded))
            .map(|(_, l)| l)
    }

    /// Marker type a placeholder of `owner` renders `placeholder` with.
    fn placeholder_marker(&self, owner: &Level, placeholder: LevelId) -> MarkerType {
        if owner.properties.legal {
            return MarkerType::Decimal;
        }
        self.levels
            .get(&placeholder)
            .map_or(MarkerType::Decimal, |l| l.properties.marker)
    }

    /// Render the marker of the deepest level in `counters`, without the
    /// trailing whitespace (e.g. `"3.2.1)"`).
    ///
    /// Placeholders whose level has no counter render as empty strings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use litchi_outline::numbering::{
    ///     Enumeration, Level, LevelProperties, MarkerPattern, MarkerType,
    /// };
    ///
    /// let level = |id, template: &str, marker| {
    ///     Level::new(id, LevelProperties {
    ///         pattern: MarkerPattern::parse(template),
    ///         marker,
    ///         ..Default::default()
    ///     })
    /// };
    /// let enumeration = Enumeration::new(1, 0, [
    ///     level(0, "%1.", MarkerType::Decimal),
    ///     level(1, "%1.%2)", MarkerType::LowerLetter),
    /// ])?;
    /// let counters = [(0, 3), (1, 2)].into_iter().collect();
    /// assert_eq!(enumeration.format(&counters), "3.b)");
    /// # Ok::<(), litchi_outline::common::Error>(())
    /// ```
    pub fn format(&self, counters: &Counters) -> String {
        match counters.keys().next_back() {
            Some(&deepest) => self.format_level(deepest, counters),
            None => String::new(),
        }
    }

    /// Render the marker of `level`, without the trailing whitespace.
    pub fn format_level(&self, level: LevelId, counters: &Counters) -> String {
        let Some(owner) = self.levels.get(&level) else {
            return String::new();
        };
        owner.properties.pattern.format(|placeholder| {
            counters
                .get(&placeholder)
                .map(|&value| self.placeholder_marker(owner, placeholder).format(value))
        })
    }

    /// Render the full marker of the deepest level in `counters`, trailing
    /// whitespace included.
    pub fn render(&self, counters: &Counters) -> String {
        let mut marker = self.format(counters);
        if let Some(level) = counters.keys().next_back().and_then(|l| self.levels.get(l)) {
            marker.push_str(level.properties.whitespace.render());
        }
        marker
    }

    fn compile_detectors(&self) -> Result<Vec<Detector>> {
        let mut detectors = Vec::new();
        for level in self.levels.values() {
            let pattern = &level.properties.pattern;
            if pattern.is_empty() {
                continue;
            }

            let mut source = String::from("^");
            let mut groups = SmallVec::new();
            for segment in pattern.segments() {
                match segment {
                    Segment::Literal(text) => source.push_str(&regex::escape(text)),
                    Segment::Level(placeholder) => {
                        let marker = self.placeholder_marker(level, *placeholder);
                        if marker.carries_value() {
                            source.push('(');
                            source.push_str(marker.detection_pattern());
                            source.push(')');
                            groups.push(*placeholder);
                        } else if !marker.detection_pattern().is_empty() {
                            source.push_str("(?:");
                            source.push_str(marker.detection_pattern());
                            source.push(')');
                        }
                    },
                }
            }
            source.push_str(level.properties.whitespace.detection_pattern());

            detectors.push(Detector {
                level: level.id,
                regex: Regex::new(&source)?,
                groups,
            });
        }
        Ok(detectors)
    }

    /// Find every level whose marker the text starts with.
    ///
    /// Matches whose captured values are not canonical renderings (e.g.
    /// `"IIII"` for an upper-roman level) are dropped.
    pub fn detect(&self, text: &str) -> Vec<Detection> {
        self.detectors
            .iter()
            .filter_map(|detector| self.detect_level(detector, text))
            .collect()
    }

    fn detect_level(&self, detector: &Detector, text: &str) -> Option<Detection> {
        let captures = detector.regex.captures(text)?;
        let owner = self.levels.get(&detector.level)?;
        let mut counters = Counters::new();
        for (i, &placeholder) in detector.groups.iter().enumerate() {
            let matched = captures.get(i + 1)?.as_str();
            let value = self
                .placeholder_marker(owner, placeholder)
                .counter_from_string(matched)?;
            if placeholder <= detector.level {
                counters.insert(placeholder, value);
            }
        }
        Some(Detection {
            numbering: self.id,
            level: detector.level,
            length: captures.get(0)?.end(),
            counters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::level::LevelProperties;
    use crate::numbering::marker::Whitespace;
    use crate::numbering::pattern::MarkerPattern;

    fn level(id: LevelId, template: &str, marker: MarkerType) -> Level {
        Level::new(
            id,
            LevelProperties {
                pattern: MarkerPattern::parse(template),
                marker,
                ..Default::default()
            },
        )
    }

    fn outline() -> Enumeration {
        Enumeration::new(
            7,
            1,
            [
                level(0, "%1.", MarkerType::UpperRoman),
                level(1, "%1.%2.", MarkerType::Decimal),
                level(2, "(%3)", MarkerType::LowerLetter),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_format_uses_each_levels_marker() {
        let enumeration = outline();
        let counters = Counters::from([(0, 4), (1, 2)]);
        assert_eq!(enumeration.format(&counters), "IV.2.");
        assert_eq!(enumeration.render(&counters), "IV.2.\t");

        let counters = Counters::from([(0, 4), (1, 2), (2, 28)]);
        assert_eq!(enumeration.format(&counters), "(ab)");
        assert_eq!(enumeration.format(&Counters::new()), "");
    }

    #[test]
    fn test_legal_levels_render_decimal() {
        let mut legal = level(1, "%1.%2", MarkerType::Decimal);
        legal.properties.legal = true;
        legal.properties.whitespace = Whitespace::Space;
        let enumeration =
            Enumeration::new(1, 1, [level(0, "%1", MarkerType::UpperRoman), legal]).unwrap();
        let counters = Counters::from([(0, 3), (1, 1)]);
        assert_eq!(enumeration.format(&counters), "3.1");
    }

    #[test]
    fn test_detect_recovers_counters() {
        let enumeration = outline();
        let detections = enumeration.detect("IV.2. Scope of work");
        assert_eq!(detections.len(), 1);
        let detection = &detections[0];
        assert_eq!(detection.level, 1);
        assert_eq!(detection.length, "IV.2. ".len());
        assert_eq!(detection.counters, Counters::from([(0, 4), (1, 2)]));

        let detections = enumeration.detect("III. Background");
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].level, 0);
        assert_eq!(detections[0].counters.get(&0), Some(&3));
    }

    #[test]
    fn test_detect_drops_non_canonical_values() {
        let enumeration = outline();
        assert!(enumeration.detect("IIII. Four").is_empty());
        assert!(enumeration.detect("Plain text").is_empty());
    }

    #[test]
    fn test_detect_excludes_deeper_levels() {
        // A level whose pattern references a deeper level keeps only its own
        // and shallower counters.
        let enumeration = Enumeration::new(
            2,
            2,
            [
                level(0, "%1-%2", MarkerType::Decimal),
                level(1, "%2", MarkerType::Decimal),
            ],
        )
        .unwrap();
        let detections = enumeration.detect("3-4\tx");
        let top = detections.iter().find(|d| d.level == 0).unwrap();
        assert_eq!(top.counters, Counters::from([(0, 3)]));
    }
}
