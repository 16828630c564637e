//! Marker types: rendering a counter value and recovering it from text.
use super::words;
use serde::Serialize;

/// Number format of a numbering level (`w:numFmt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum MarkerType {
    /// No marker
    None,
    /// Bullet glyph; the glyph itself is the level's pattern
    Bullet,
    /// 1, 2, 3
    #[default]
    Decimal,
    /// 01, 02, ..., 10
    DecimalZero,
    /// ①, ②, ③
    DecimalEnclosedCircle,
    /// 1st, 2nd, 3rd
    Ordinal,
    /// One, Two, Three
    CardinalText,
    /// First, Second, Third
    OrdinalText,
    /// a, b, ..., z, aa
    LowerLetter,
    /// A, B, ..., Z, AA
    UpperLetter,
    /// i, ii, iii
    LowerRoman,
    /// I, II, III
    UpperRoman,
}

impl MarkerType {
    /// Every marker type.
    pub const ALL: [MarkerType; 12] = [
        Self::None,
        Self::Bullet,
        Self::Decimal,
        Self::DecimalZero,
        Self::DecimalEnclosedCircle,
        Self::Ordinal,
        Self::CardinalText,
        Self::OrdinalText,
        Self::LowerLetter,
        Self::UpperLetter,
        Self::LowerRoman,
        Self::UpperRoman,
    ];

    /// Parse from a `w:numFmt/@w:val` attribute value.
    ///
    /// Returns `None` for formats outside this set (e.g. East Asian
    /// counting systems).
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "bullet" => Some(Self::Bullet),
            "decimal" => Some(Self::Decimal),
            "decimalZero" => Some(Self::DecimalZero),
            "decimalEnclosedCircle" => Some(Self::DecimalEnclosedCircle),
            "ordinal" => Some(Self::Ordinal),
            "cardinalText" => Some(Self::CardinalText),
            "ordinalText" => Some(Self::OrdinalText),
            "lowerLetter" => Some(Self::LowerLetter),
            "upperLetter" => Some(Self::UpperLetter),
            "lowerRoman" => Some(Self::LowerRoman),
            "upperRoman" => Some(Self::UpperRoman),
            _ => None,
        }
    }

    /// Convert to the XML attribute value.
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bullet => "bullet",
            Self::Decimal => "decimal",
            Self::DecimalZero => "decimalZero",
            Self::DecimalEnclosedCircle => "decimalEnclosedCircle",
            Self::Ordinal => "ordinal",
            Self::CardinalText => "cardinalText",
            Self::OrdinalText => "ordinalText",
            Self::LowerLetter => "lowerLetter",
            Self::UpperLetter => "upperLetter",
            Self::LowerRoman => "lowerRoman",
            Self::UpperRoman => "upperRoman",
        }
    }

    /// Check if the marker renders the counter value at all.
    #[inline]
    pub fn carries_value(self) -> bool {
        !matches!(self, Self::None | Self::Bullet)
    }

    /// Render a counter value.
    ///
    /// Values a format cannot express (zero or negative letters and
    /// numerals, circles above 50, words above 9999) fall back to decimal.
    pub fn format(self, n: i32) -> String {
        match self {
            Self::None => String::new(),
            Self::Bullet => "\u{2022}".to_string(),
            Self::Decimal => n.to_string(),
            Self::DecimalZero if (0..10).contains(&n) => format!("0{n}"),
            Self::DecimalZero => n.to_string(),
            Self::DecimalEnclosedCircle => circled(n).map_or_else(|| n.to_string(), String::from),
            Self::Ordinal => format!("{n}{}", ordinal_suffix(n)),
            Self::CardinalText => words::cardinal(n).unwrap_or_else(|| n.to_string()),
            Self::OrdinalText => words::ordinal(n).unwrap_or_else(|| n.to_string()),
            Self::LowerLetter => letters(n).map_or_else(|| n.to_string(), |s| s.to_ascii_lowercase()),
            Self::UpperLetter => letters(n).unwrap_or_else(|| n.to_string()),
            Self::LowerRoman => roman(n).map_or_else(|| n.to_string(), |s| s.to_ascii_lowercase()),
            Self::UpperRoman => roman(n).unwrap_or_else(|| n.to_string()),
        }
    }

    /// Recover a counter value from its rendered form.
    ///
    /// Only canonical renderings are accepted: the result re-formats to the
    /// input. `None` and `Bullet` carry no value.
    pub fn counter_from_string(self, s: &str) -> Option<i32> {
        let value = match self {
            Self::None | Self::Bullet => return None,
            Self::Decimal | Self::DecimalZero => parse_decimal(s)?,
            Self::DecimalEnclosedCircle => {
                let mut chars = s.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                from_circled(c)?
            },
            Self::Ordinal => {
                let digits = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
                parse_decimal(digits)?
            },
            Self::CardinalText => return words::parse_cardinal(s),
            Self::OrdinalText => return words::parse_ordinal(s),
            Self::LowerLetter | Self::UpperLetter => from_letters(s)?,
            Self::LowerRoman | Self::UpperRoman => from_roman(s)?,
        };
        (self.format(value) == s).then_some(value)
    }

    /// Regex fragment recognizing this type's rendered values.
    ///
    /// The fragment may contain top-level alternation, so callers must wrap
    /// it in a group.
    pub fn detection_pattern(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Bullet => "[\u{2022}\u{25E6}\u{25AA}\u{25CF}\u{25CB}\u{25A0}\u{25A1}\u{2013}\u{F0B7}\u{F0A7}o*-]",
            Self::Decimal => "[0-9]+",
            Self::DecimalZero => "0[1-9]|[1-9][0-9]+",
            Self::DecimalEnclosedCircle => "[\u{2460}-\u{2473}\u{3251}-\u{325F}\u{32B1}-\u{32BF}]",
            Self::Ordinal => "[0-9]+(?:st|nd|rd|th)",
            Self::CardinalText => words::CARDINAL_PATTERN.as_str(),
            Self::OrdinalText => words::ORDINAL_PATTERN.as_str(),
            // Two letters reach 702 (`zz`); longer runs are words.
            Self::LowerLetter => "[a-z]{1,2}",
            Self::UpperLetter => "[A-Z]{1,2}",
            Self::LowerRoman => "[ivxlcdm]+",
            Self::UpperRoman => "[IVXLCDM]+",
        }
    }
}

fn parse_decimal(s: &str) -> Option<i32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn ordinal_suffix(n: i32) -> &'static str {
    let n = n.unsigned_abs();
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Circled digits: U+2460..U+2473 (1-20), U+3251..U+325F (21-35) and
/// U+32B1..U+32BF (36-50).
fn circled(n: i32) -> Option<char> {
    let code = match n {
        1..=20 => 0x2460 + (n - 1) as u32,
        21..=35 => 0x3251 + (n - 21) as u32,
        36..=50 => 0x32B1 + (n - 36) as u32,
        _ => return None,
    };
    char::from_u32(code)
}

fn from_circled(c: char) -> Option<i32> {
    let code = c as u32;
    match code {
        0x2460..=0x2473 => Some((code - 0x2460) as i32 + 1),
        0x3251..=0x325F => Some((code - 0x3251) as i32 + 21),
        0x32B1..=0x32BF => Some((code - 0x32B1) as i32 + 36),
        _ => None,
    }
}

/// Bijective base-26: 1 → A, 26 → Z, 27 → AA.
fn letters(n: i32) -> Option<String> {
    if n <= 0 {
        return None;
    }
    let mut n = n as u32;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).ok()
}

fn from_letters(s: &str) -> Option<i32> {
    if s.is_empty() {
        return None;
    }
    let mut value: i32 = 0;
    for b in s.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = (b.to_ascii_uppercase() - b'A') as i32 + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }
    Some(value)
}

const ROMAN: [(i32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

fn roman(n: i32) -> Option<String> {
    if n <= 0 {
        return None;
    }
    let mut n = n;
    let mut out = String::new();
    for &(value, symbol) in &ROMAN {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    Some(out)
}

fn from_roman(s: &str) -> Option<i32> {
    if s.is_empty() {
        return None;
    }
    let mut total = 0i32;
    let mut previous = 0i32;
    for c in s.chars().rev() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < previous {
            total -= value;
        } else {
            total += value;
            previous = value;
        }
    }
    Some(total)
}

/// Whitespace between a marker and the paragraph text (`w:suff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Whitespace {
    /// Tab character
    #[default]
    Tab,
    /// Single space
    Space,
    /// Nothing
    Nothing,
}

impl Whitespace {
    /// Parse from a `w:suff/@w:val` attribute value.
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "tab" => Some(Self::Tab),
            "space" => Some(Self::Space),
            "nothing" => Some(Self::Nothing),
            _ => None,
        }
    }

    /// Rendered text.
    #[inline]
    pub const fn render(self) -> &'static str {
        match self {
            Self::Tab => "\t",
            Self::Space => " ",
            Self::Nothing => "",
        }
    }

    /// Regex fragment matching this whitespace in extracted text, where tabs
    /// often arrive as plain spaces.
    #[inline]
    pub const fn detection_pattern(self) -> &'static str {
        match self {
            Self::Tab | Self::Space => r"\s+",
            Self::Nothing => r"\s*",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::Regex;

    #[test]
    fn test_xml_names_round_trip() {
        for marker in MarkerType::ALL {
            assert_eq!(MarkerType::from_xml(marker.to_xml()), Some(marker));
        }
        assert_eq!(MarkerType::from_xml("chineseCounting"), None);
    }

    #[test]
    fn test_rendering() {
        assert_eq!(MarkerType::UpperLetter.format(1), "A");
        assert_eq!(MarkerType::UpperLetter.format(26), "Z");
        assert_eq!(MarkerType::UpperLetter.format(27), "AA");
        assert_eq!(MarkerType::LowerLetter.format(53), "ba");
        assert_eq!(MarkerType::LowerRoman.format(14), "xiv");
        assert_eq!(MarkerType::UpperRoman.format(1994), "MCMXCIV");
        assert_eq!(MarkerType::DecimalZero.format(7), "07");
        assert_eq!(MarkerType::DecimalZero.format(12), "12");
        assert_eq!(MarkerType::Ordinal.format(11), "11th");
        assert_eq!(MarkerType::Ordinal.format(22), "22nd");
        assert_eq!(MarkerType::DecimalEnclosedCircle.format(1), "\u{2460}");
        assert_eq!(MarkerType::DecimalEnclosedCircle.format(21), "\u{3251}");
        assert_eq!(MarkerType::DecimalEnclosedCircle.format(50), "\u{32BF}");
        assert_eq!(MarkerType::DecimalEnclosedCircle.format(51), "51");
        assert_eq!(MarkerType::CardinalText.format(3), "Three");
        assert_eq!(MarkerType::None.format(3), "");
        // Values a format cannot express fall back to decimal.
        assert_eq!(MarkerType::UpperRoman.format(0), "0");
    }

    #[test]
    fn test_non_canonical_text_is_rejected() {
        assert_eq!(MarkerType::UpperRoman.counter_from_string("IIII"), None);
        assert_eq!(MarkerType::UpperRoman.counter_from_string("iv"), None);
        assert_eq!(MarkerType::Decimal.counter_from_string("007"), None);
        assert_eq!(MarkerType::DecimalZero.counter_from_string("7"), None);
        assert_eq!(MarkerType::Ordinal.counter_from_string("2st"), None);
        assert_eq!(MarkerType::LowerLetter.counter_from_string("A"), None);
        assert_eq!(MarkerType::Bullet.counter_from_string("\u{2022}"), None);
    }

    #[test]
    fn test_decimal_zero_pattern_groups_multi_digit_values() {
        let regex = Regex::new(&format!(
            "^({})\\.",
            MarkerType::DecimalZero.detection_pattern()
        ))
        .unwrap();
        assert_eq!(&regex.captures("07. x").unwrap()[1], "07");
        assert_eq!(&regex.captures("12. x").unwrap()[1], "12");
        assert_eq!(&regex.captures("107. x").unwrap()[1], "107");
        assert!(regex.captures("7. x").is_none());
    }

    #[test]
    fn test_detection_patterns_match_rendered_values() {
        for marker in MarkerType::ALL {
            if !marker.carries_value() {
                continue;
            }
            let regex = Regex::new(&format!("^(?:{})$", marker.detection_pattern())).unwrap();
            for n in 1..=50 {
                let rendered = marker.format(n);
                assert!(regex.is_match(&rendered), "{marker:?} {rendered}");
            }
        }
    }

    #[test]
    fn test_letter_patterns_do_not_match_words() {
        let lower = Regex::new(&format!(
            "^({})\\.\\s+",
            MarkerType::LowerLetter.detection_pattern()
        ))
        .unwrap();
        assert_eq!(&lower.captures("b. item").unwrap()[1], "b");
        assert_eq!(&lower.captures("aa. item").unwrap()[1], "aa");
        assert!(lower.captures("etc. and so on").is_none());

        let upper = Regex::new(&format!(
            "^({})\\.\\s+",
            MarkerType::UpperLetter.detection_pattern()
        ))
        .unwrap();
        assert_eq!(&upper.captures("ZZ. last").unwrap()[1], "ZZ");
        assert!(upper.captures("Then. nothing").is_none());
        assert!(upper.captures("USA. abroad").is_none());
    }

    proptest! {
        #[test]
        fn prop_marker_round_trip(n in 1i32..=50) {
            for marker in MarkerType::ALL {
                if marker.carries_value() {
                    prop_assert_eq!(marker.counter_from_string(&marker.format(n)), Some(n));
                }
            }
        }

        #[test]
        fn prop_letters_and_numerals_round_trip_beyond_fifty(n in 51i32..5000) {
            for marker in [
                MarkerType::UpperLetter,
                MarkerType::LowerLetter,
                MarkerType::UpperRoman,
                MarkerType::LowerRoman,
                MarkerType::Decimal,
                MarkerType::Ordinal,
            ] {
                prop_assert_eq!(marker.counter_from_string(&marker.format(n)), Some(n));
            }
        }
    }
}
