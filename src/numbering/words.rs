//! English number words for the `cardinalText` and `ordinalText` marker types.
//!
//! Words cover 1..=9999 (`"one thousand two hundred thirty-four"`). Rendered
//! forms capitalize the first letter the way word processors display them;
//! parsing is case-insensitive and only accepts canonical spellings.
use once_cell::sync::Lazy;
use phf::phf_map;

/// Largest value with a word form.
pub const MAX_WORDS: i32 = 9999;

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Cardinal word values.
static CARDINALS: phf::Map<&'static str, u32> = phf_map! {
    "one" => 1,
    "two" => 2,
    "three" => 3,
    "four" => 4,
    "five" => 5,
    "six" => 6,
    "seven" => 7,
    "eight" => 8,
    "nine" => 9,
    "ten" => 10,
    "eleven" => 11,
    "twelve" => 12,
    "thirteen" => 13,
    "fourteen" => 14,
    "fifteen" => 15,
    "sixteen" => 16,
    "seventeen" => 17,
    "eighteen" => 18,
    "nineteen" => 19,
    "twenty" => 20,
    "thirty" => 30,
    "forty" => 40,
    "fifty" => 50,
    "sixty" => 60,
    "seventy" => 70,
    "eighty" => 80,
    "ninety" => 90,
    "hundred" => 100,
    "thousand" => 1000,
};

/// Ordinal word → cardinal word.
static ORDINALS: phf::Map<&'static str, &'static str> = phf_map! {
    "first" => "one",
    "second" => "two",
    "third" => "three",
    "fourth" => "four",
    "fifth" => "five",
    "sixth" => "six",
    "seventh" => "seven",
    "eighth" => "eight",
    "ninth" => "nine",
    "tenth" => "ten",
    "eleventh" => "eleven",
    "twelfth" => "twelve",
    "thirteenth" => "thirteen",
    "fourteenth" => "fourteen",
    "fifteenth" => "fifteen",
    "sixteenth" => "sixteen",
    "seventeenth" => "seventeen",
    "eighteenth" => "eighteen",
    "nineteenth" => "nineteen",
    "twentieth" => "twenty",
    "thirtieth" => "thirty",
    "fortieth" => "forty",
    "fiftieth" => "fifty",
    "sixtieth" => "sixty",
    "seventieth" => "seventy",
    "eightieth" => "eighty",
    "ninetieth" => "ninety",
    "hundredth" => "hundred",
    "thousandth" => "thousand",
};

fn alternation<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut words: Vec<&str> = words.collect();
    // Longest first so "seventeen" is not cut short at "seven".
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.join("|")
}

/// Regex fragment matching a cardinal number in words.
pub static CARDINAL_PATTERN: Lazy<String> = Lazy::new(|| {
    let words = alternation(CARDINALS.keys().copied());
    format!("(?i:(?:{words})(?:[ -](?:{words}))*)")
});

/// Regex fragment matching an ordinal number in words.
pub static ORDINAL_PATTERN: Lazy<String> = Lazy::new(|| {
    let cardinals = alternation(CARDINALS.keys().copied());
    let ordinals = alternation(ORDINALS.keys().copied());
    format!("(?i:(?:(?:{cardinals})[ -])*(?:{ordinals}))")
});

fn below_hundred(n: u32, out: &mut Vec<String>) {
    match n {
        0 => {},
        1..=19 => out.push(ONES[n as usize].to_string()),
        _ => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => out.push(tens.to_string()),
                ones => out.push(format!("{tens}-{}", ONES[ones as usize])),
            }
        },
    }
}

fn lowercase_cardinal(n: u32) -> String {
    let mut parts = Vec::new();
    if n >= 1000 {
        below_hundred(n / 1000, &mut parts);
        parts.push("thousand".to_string());
    }
    let rest = n % 1000;
    if rest >= 100 {
        parts.push(ONES[(rest / 100) as usize].to_string());
        parts.push("hundred".to_string());
    }
    below_hundred(rest % 100, &mut parts);
    parts.join(" ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render `n` as cardinal words, e.g. `"Twenty-one"`.
///
/// Returns `None` outside 1..=[`MAX_WORDS`].
pub fn cardinal(n: i32) -> Option<String> {
    if !(1..=MAX_WORDS).contains(&n) {
        return None;
    }
    Some(capitalize(&lowercase_cardinal(n as u32)))
}

/// Render `n` as ordinal words, e.g. `"Twenty-first"`.
///
/// Returns `None` outside 1..=[`MAX_WORDS`].
pub fn ordinal(n: i32) -> Option<String> {
    if !(1..=MAX_WORDS).contains(&n) {
        return None;
    }
    let words = lowercase_cardinal(n as u32);
    // Only the last word takes the ordinal form.
    let split = words.rfind([' ', '-']).map_or(0, |i| i + 1);
    let (head, last) = words.split_at(split);
    let last = ORDINALS
        .entries()
        .find(|(_, cardinal)| **cardinal == last)
        .map_or(last, |(ordinal, _)| *ordinal);
    Some(capitalize(&format!("{head}{last}")))
}

fn parse_words(s: &str, ordinal_form: bool) -> Option<i32> {
    let lower = s.trim().to_ascii_lowercase();
    let tokens: Vec<&str> = lower.split([' ', '-']).collect();
    let (&last, head) = tokens.split_last()?;

    let last = if ordinal_form {
        *ORDINALS.get(last)?
    } else {
        last
    };

    let mut total = 0u32;
    let mut current = 0u32;
    for token in head.iter().copied().chain(std::iter::once(last)) {
        match *CARDINALS.get(token)? {
            100 => current = current.max(1) * 100,
            1000 => {
                total += current.max(1) * 1000;
                current = 0;
            },
            value => current += value,
        }
    }
    let value = i32::try_from(total + current).ok()?;

    // Reject non-canonical spellings such as "five five".
    let rendered = if ordinal_form {
        ordinal(value)?
    } else {
        cardinal(value)?
    };
    rendered.eq_ignore_ascii_case(s.trim()).then_some(value)
}

/// Parse cardinal words back into a number.
pub fn parse_cardinal(s: &str) -> Option<i32> {
    parse_words(s, false)
}

/// Parse ordinal words back into a number.
pub fn parse_ordinal(s: &str) -> Option<i32> {
    parse_words(s, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_cardinal_rendering() {
        assert_eq!(cardinal(1).as_deref(), Some("One"));
        assert_eq!(cardinal(17).as_deref(), Some("Seventeen"));
        assert_eq!(cardinal(40).as_deref(), Some("Forty"));
        assert_eq!(cardinal(121).as_deref(), Some("One hundred twenty-one"));
        assert_eq!(
            cardinal(2019).as_deref(),
            Some("Two thousand nineteen")
        );
        assert_eq!(cardinal(0), None);
        assert_eq!(cardinal(10_000), None);
    }

    #[test]
    fn test_ordinal_rendering() {
        assert_eq!(ordinal(1).as_deref(), Some("First"));
        assert_eq!(ordinal(12).as_deref(), Some("Twelfth"));
        assert_eq!(ordinal(20).as_deref(), Some("Twentieth"));
        assert_eq!(ordinal(23).as_deref(), Some("Twenty-third"));
        assert_eq!(ordinal(300).as_deref(), Some("Three hundredth"));
    }

    #[test]
    fn test_words_parse_back() {
        for n in 1..=1200 {
            assert_eq!(parse_cardinal(&cardinal(n).unwrap()), Some(n));
            assert_eq!(parse_ordinal(&ordinal(n).unwrap()), Some(n));
        }
        assert_eq!(parse_cardinal("TWENTY-ONE"), Some(21));
        assert_eq!(parse_cardinal("five five"), None);
        assert_eq!(parse_ordinal("one"), None);
    }

    #[test]
    fn test_patterns_match_longest_word() {
        let cardinal = Regex::new(&format!("^(?:{})$", *CARDINAL_PATTERN)).unwrap();
        assert!(cardinal.is_match("Seventeen"));
        assert!(cardinal.is_match("one hundred twenty-one"));

        let ordinal = Regex::new(&format!("^(?:{})", *ORDINAL_PATTERN)).unwrap();
        let m = ordinal.find("Seventeenth item").unwrap();
        assert_eq!(m.as_str(), "Seventeenth");
    }
}
