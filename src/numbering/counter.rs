//! Running list counters.
use super::enumeration::Enumeration;
use super::level::{Counters, LevelId, NumberingId};
use std::collections::HashMap;

/// Per-instance, per-level counters, advanced as indexed blocks are visited
/// in document order.
///
/// Only indexed blocks touch the engine, so unnumbered paragraphs between
/// two list items do not break continuity.
#[derive(Debug, Clone, Default)]
pub struct CounterEngine {
    counters: HashMap<NumberingId, Counters>,
    previous: Option<NumberingId>,
}

impl CounterEngine {
    /// Create an engine with every counter unset.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter.
    pub fn current(&self, numbering: NumberingId, level: LevelId) -> Option<i32> {
        self.counters
            .get(&numbering)
            .and_then(|levels| levels.get(&level))
            .copied()
    }

    /// Numbering instance of the last visited block.
    #[inline]
    pub fn previous(&self) -> Option<NumberingId> {
        self.previous
    }

    /// The value [`visit`](Self::visit) would assign, without advancing.
    pub fn next_value(&self, enumeration: &Enumeration, level: LevelId) -> i32 {
        let (start, restarts_on_switch) = enumeration.level(level).map_or((1, false), |l| {
            (
                l.properties.effective_start(),
                l.properties.override_start.is_some(),
            )
        });
        match self.current(enumeration.id, level) {
            None => start,
            Some(_) if restarts_on_switch && self.previous != Some(enumeration.id) => start,
            Some(value) => value.saturating_add(1),
        }
    }

    /// Advance the counter of `level` for the next block of `enumeration`
    /// and return the snapshot of every defined counter up to `level`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use litchi_outline::numbering::{CounterEngine, Enumeration, Level, LevelProperties};
    ///
    /// let level = Level::new(0, LevelProperties { start: 5, ..Default::default() });
    /// let enumeration = Enumeration::new(1, 0, [level])?;
    /// let mut engine = CounterEngine::new();
    /// assert_eq!(engine.visit(&enumeration, 0).get(&0), Some(&5));
    /// assert_eq!(engine.visit(&enumeration, 0).get(&0), Some(&6));
    /// # Ok::<(), litchi_outline::common::Error>(())
    /// ```
    pub fn visit(&mut self, enumeration: &Enumeration, level: LevelId) -> Counters {
        let value = self.next_value(enumeration, level);
        self.advance(enumeration, level, value)
    }

    /// Set counters from values recovered out of literal marker text, so
    /// later explicit items continue from them.
    ///
    /// `recovered` holds the values of `level` and its ancestors; a level
    /// missing from it (a bullet, say) advances normally.
    pub fn seed(
        &mut self,
        enumeration: &Enumeration,
        level: LevelId,
        recovered: &Counters,
    ) -> Counters {
        let levels = self.counters.entry(enumeration.id).or_default();
        for (&ancestor, &value) in recovered.range(..level) {
            levels.insert(ancestor, value);
        }
        let value = match recovered.get(&level) {
            Some(&value) => value,
            None => self.next_value(enumeration, level),
        };
        self.advance(enumeration, level, value)
    }

    fn advance(&mut self, enumeration: &Enumeration, level: LevelId, value: i32) -> Counters {
        let levels = self.counters.entry(enumeration.id).or_default();
        levels.insert(level, value);
        for deeper in enumeration.deeper(level) {
            if deeper.properties.restart.triggered_by(level) {
                levels.insert(deeper.id, deeper.properties.effective_start().saturating_sub(1));
            }
        }
        self.previous = Some(enumeration.id);
        levels.range(..=level).map(|(&l, &v)| (l, v)).collect()
    }
}
