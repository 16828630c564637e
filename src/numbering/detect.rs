//! Implied-index selection for paragraphs typed with literal markers.
//!
//! A paragraph without numbering properties may still start with `"2.3 "`
//! typed by hand. Every enumeration level whose marker matches the text is a
//! candidate; candidates whose level is owned by the paragraph's style are
//! *full* matches, the rest *partial*. Full matches always win; partial ones
//! are only accepted when the policy allows.
use super::counter::CounterEngine;
use super::enumeration::Detection;
use super::resolver::NumberingRegistry;
use serde::Serialize;

/// Which text-pattern matches may produce an implied index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ImpliedIndexPolicy {
    /// Never infer indices from text
    #[default]
    Disabled,
    /// Accept only matches whose level is owned by the paragraph's style
    StyleMatchOnly,
    /// Fall back to pattern-only matches when no style match exists
    AllowPartial,
}

impl ImpliedIndexPolicy {
    /// Check if detection runs at all.
    #[inline]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Check if pattern-only matches are accepted.
    #[inline]
    pub fn allows_partial(self) -> bool {
        matches!(self, Self::AllowPartial)
    }
}

/// Strength of a marker match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchKind {
    /// The pattern matches
    RegexOnly,
    /// The pattern matches and the level is owned by the paragraph's style
    RegexAndStyle,
}

/// A classified marker match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpliedMatch {
    /// The detection
    pub detection: Detection,
    /// Match strength
    pub kind: MatchKind,
}

/// Classify detections by whether their level's owning style satisfies
/// `is_block_style`.
pub fn classify(
    detections: Vec<Detection>,
    numbering: &NumberingRegistry,
    mut is_block_style: impl FnMut(&str) -> bool,
) -> Vec<ImpliedMatch> {
    detections
        .into_iter()
        .map(|detection| {
            let owned = numbering
                .get(detection.numbering)
                .and_then(|enumeration| enumeration.level(detection.level))
                .and_then(|level| level.style.as_deref())
                .is_some_and(&mut is_block_style);
            ImpliedMatch {
                detection,
                kind: if owned {
                    MatchKind::RegexAndStyle
                } else {
                    MatchKind::RegexOnly
                },
            }
        })
        .collect()
}

/// Pick the implied index among classified matches, or `None`.
///
/// | full | partial | partial allowed | outcome            |
/// |------|---------|-----------------|--------------------|
/// | 0    | 0       | any             | none               |
/// | 0    | ≥1      | no              | none               |
/// | 0    | ≥1      | yes             | best partial match |
/// | ≥1   | any     | any             | best full match    |
///
/// Within the accepted set the longest marker wins, then one continuing
/// its counter, then the lowest (numbering, level).
pub fn select(
    matches: Vec<ImpliedMatch>,
    policy: ImpliedIndexPolicy,
    numbering: &NumberingRegistry,
    counters: &CounterEngine,
) -> Option<ImpliedMatch> {
    if !policy.is_enabled() {
        return None;
    }

    let (full, partial): (Vec<_>, Vec<_>) = matches
        .into_iter()
        .partition(|m| m.kind == MatchKind::RegexAndStyle);
    let accepted = if !full.is_empty() {
        full
    } else if policy.allows_partial() {
        partial
    } else {
        return None;
    };

    let continues = |m: &ImpliedMatch| {
        let detection = &m.detection;
        match (
            numbering.get(detection.numbering),
            detection.counters.get(&detection.level),
        ) {
            (Some(enumeration), Some(&value)) => {
                counters.next_value(enumeration, detection.level) == value
            },
            _ => false,
        }
    };

    accepted.into_iter().max_by(|a, b| {
        let (da, db) = (&a.detection, &b.detection);
        da.length
            .cmp(&db.length)
            .then_with(|| continues(a).cmp(&continues(b)))
            .then_with(|| (db.numbering, db.level).cmp(&(da.numbering, da.level)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Diagnostics;
    use crate::numbering::definition::{
        AbstractNumberingDefinition, LevelDefinition, NumberingDefinition,
    };
    use crate::numbering::level::LevelProperties;
    use crate::numbering::marker::MarkerType;
    use crate::numbering::pattern::MarkerPattern;
    use crate::numbering::resolver::NumberingResolver;
    use crate::style::{DocumentDefaults, StyleResolver};

    /// Numbering 1: decimal "%1." owned by "ListNumber".
    /// Numbering 2: lower roman "%1." with no owner.
    /// Numbering 3: lower letter "%1." with no owner.
    fn registry() -> NumberingRegistry {
        let level = |template: &str, marker, style: Option<&str>| {
            let mut definition = LevelDefinition::new(
                0,
                LevelProperties {
                    pattern: MarkerPattern::parse(template),
                    marker,
                    ..Default::default()
                },
            );
            definition.style = style.map(String::from);
            definition
        };
        let abstracts = vec![
            AbstractNumberingDefinition {
                id: 1,
                levels: vec![level("%1.", MarkerType::Decimal, Some("ListNumber"))],
                ..Default::default()
            },
            AbstractNumberingDefinition {
                id: 2,
                levels: vec![level("%1.", MarkerType::LowerRoman, None)],
                ..Default::default()
            },
            AbstractNumberingDefinition {
                id: 3,
                levels: vec![level("%1.", MarkerType::LowerLetter, None)],
                ..Default::default()
            },
        ];
        let numberings = vec![
            NumberingDefinition::new(1, 1),
            NumberingDefinition::new(2, 2),
            NumberingDefinition::new(3, 3),
        ];
        let styles = StyleResolver::new(&DocumentDefaults::default(), &[])
            .resolve()
            .unwrap();
        NumberingResolver::new(&abstracts, &numberings, &styles)
            .resolve(&mut Diagnostics::new())
            .unwrap()
    }

    fn pick(
        text: &str,
        style: &str,
        policy: ImpliedIndexPolicy,
        counters: &CounterEngine,
    ) -> Option<Detection> {
        let registry = registry();
        let matches = classify(registry.detect(text), &registry, |owner| owner == style);
        select(matches, policy, &registry, counters).map(|m| m.detection)
    }

    #[test]
    fn test_no_match_gives_no_index() {
        let counters = CounterEngine::new();
        for policy in [
            ImpliedIndexPolicy::StyleMatchOnly,
            ImpliedIndexPolicy::AllowPartial,
        ] {
            assert_eq!(pick("Plain text", "ListNumber", policy, &counters), None);
        }
    }

    #[test]
    fn test_partial_matches_need_permission() {
        let counters = CounterEngine::new();
        assert_eq!(
            pick("3. Results", "Normal", ImpliedIndexPolicy::StyleMatchOnly, &counters),
            None
        );
        let detection =
            pick("3. Results", "Normal", ImpliedIndexPolicy::AllowPartial, &counters).unwrap();
        assert_eq!(detection.numbering, 1);
        assert_eq!(detection.counters.get(&0), Some(&3));
    }

    #[test]
    fn test_full_match_overrides_partials() {
        let counters = CounterEngine::new();
        // "i." is both a roman and a letter marker, neither owned by the style.
        let detection =
            pick("i. Scope", "Normal", ImpliedIndexPolicy::AllowPartial, &counters).unwrap();
        assert_eq!(detection.numbering, 2);

        let detection =
            pick("7. Scope", "ListNumber", ImpliedIndexPolicy::StyleMatchOnly, &counters).unwrap();
        assert_eq!(detection.numbering, 1);
        assert_eq!(detection.length, 3);
    }

    #[test]
    fn test_counter_continuation_breaks_ties() {
        let registry = registry();
        let mut counters = CounterEngine::new();
        // The letter list has reached "h", so "i." continues it; the roman
        // list is already at "iii".
        let letters = registry.get(3).unwrap();
        for _ in 0..8 {
            counters.visit(letters, 0);
        }
        let numerals = registry.get(2).unwrap();
        for _ in 0..3 {
            counters.visit(numerals, 0);
        }
        let matches = classify(registry.detect("i. Next"), &registry, |_| false);
        let chosen = select(
            matches,
            ImpliedIndexPolicy::AllowPartial,
            &registry,
            &counters,
        )
        .unwrap();
        assert_eq!(chosen.detection.numbering, 3);
        assert_eq!(chosen.kind, MatchKind::RegexOnly);
    }

    #[test]
    fn test_disabled_policy_never_selects() {
        let counters = CounterEngine::new();
        assert_eq!(
            pick("1. One", "ListNumber", ImpliedIndexPolicy::Disabled, &counters),
            None
        );
    }
}
