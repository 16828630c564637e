//! Marker pattern templates (`w:lvlText`).
//!
//! A template such as `"%1.%2)"` mixes literal text with placeholders
//! `%1`..`%9`, each standing for the rendered counter of level 0..8.
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// One piece of a marker pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Rendered counter of the given (0-based) level
    Level(u8),
}

/// A parsed marker pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerPattern {
    segments: SmallVec<[Segment; 4]>,
}

impl MarkerPattern {
    /// Parse a `w:lvlText/@w:val` template.
    ///
    /// A `%` not followed by a digit in `1..=9` is kept as literal text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use litchi_outline::numbering::{MarkerPattern, Segment};
    ///
    /// let pattern = MarkerPattern::parse("%1.%2)");
    /// assert_eq!(pattern.segments()[0], Segment::Level(0));
    /// assert_eq!(pattern.segments()[1], Segment::Literal(".".to_string()));
    /// assert_eq!(pattern.placeholders().collect::<Vec<_>>(), vec![0, 1]);
    /// ```
    pub fn parse(template: &str) -> Self {
        let mut segments = SmallVec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '%' {
                let level = chars
                    .peek()
                    .and_then(|d| d.to_digit(10))
                    .filter(|d| (1..=9).contains(d));
                if let Some(level) = level {
                    chars.next();
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Level(level as u8 - 1));
                    continue;
                }
            }
            literal.push(c);
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// The pattern's segments in order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check if the pattern renders nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Levels referenced by placeholders, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = u8> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Level(level) => Some(*level),
            Segment::Literal(_) => None,
        })
    }

    /// Render the pattern, substituting each placeholder with `render(level)`.
    pub fn format(&self, mut render: impl FnMut(u8) -> Option<String>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Level(level) => {
                    if let Some(text) = render(*level) {
                        out.push_str(&text);
                    }
                },
            }
        }
        out
    }
}

impl fmt::Display for MarkerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Level(level) => write!(f, "%{}", level + 1)?,
            }
        }
        Ok(())
    }
}
