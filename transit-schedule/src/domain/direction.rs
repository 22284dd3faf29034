//! Travel direction of a schedule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction a schedule page describes.
///
/// Schedule pages name directions in prose ("North Bound", "Clockwise").
/// [`Direction::from_word`] classifies the captured word; words outside the
/// known vocabulary are kept as [`Direction::Unrecognized`] rather than
/// rejected, so callers can decide how strict to be.
///
/// # Examples
///
/// ```
/// use transit_schedule::domain::Direction;
///
/// assert_eq!(Direction::from_word("North"), Direction::North);
/// assert_eq!(Direction::from_word("Counterclockwise").code(), "CCW");
/// assert_eq!(Direction::from_word("Up").code(), "? (Up)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Loop,
    Clockwise,
    Counterclockwise,
    /// A captured word with no known short code.
    Unrecognized(String),
}

impl Direction {
    /// Classify a direction word captured from page text.
    pub fn from_word(word: &str) -> Self {
        match word {
            "North" => Direction::North,
            "South" => Direction::South,
            "East" => Direction::East,
            "West" => Direction::West,
            "Loop" => Direction::Loop,
            "Clockwise" => Direction::Clockwise,
            "Counterclockwise" => Direction::Counterclockwise,
            other => Direction::Unrecognized(other.to_string()),
        }
    }

    /// Parse a short code as produced by [`Direction::code`].
    ///
    /// Anything that isn't a known code is treated as unrecognized.
    pub fn from_code(code: &str) -> Self {
        match code {
            "N" => Direction::North,
            "S" => Direction::South,
            "E" => Direction::East,
            "W" => Direction::West,
            "Loop" => Direction::Loop,
            "CW" => Direction::Clockwise,
            "CCW" => Direction::Counterclockwise,
            other => {
                let word = other
                    .strip_prefix("? (")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .unwrap_or(other);
                Direction::Unrecognized(word.to_string())
            }
        }
    }

    /// Short code used in schedule requests and summaries.
    pub fn code(&self) -> String {
        match self {
            Direction::North => "N".to_string(),
            Direction::South => "S".to_string(),
            Direction::East => "E".to_string(),
            Direction::West => "W".to_string(),
            Direction::Loop => "Loop".to_string(),
            Direction::Clockwise => "CW".to_string(),
            Direction::Counterclockwise => "CCW".to_string(),
            Direction::Unrecognized(word) => format!("? ({word})"),
        }
    }

    /// Whether the word had a known short code.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Direction::Unrecognized(_))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.code()
    }
}

impl From<String> for Direction {
    fn from(code: String) -> Self {
        Direction::from_code(&code)
    }
}

/// Every direction a schedule page offers, in page order.
///
/// Rendered as the hyphen-joined sequence of short codes (`"N-S"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct DirectionCodes(Vec<Direction>);

impl DirectionCodes {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a direction.
    pub fn push(&mut self, direction: Direction) {
        self.0.push(direction);
    }

    /// Directions in page order.
    pub fn as_slice(&self) -> &[Direction] {
        &self.0
    }

    /// Number of directions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no direction was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a hyphen-joined code sequence.
    ///
    /// Hyphens inside an unrecognized marker's parentheses don't split.
    pub fn parse(s: &str) -> Self {
        let mut codes = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (i, c) in s.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                '-' if depth == 0 => {
                    codes.push(Direction::from_code(&s[start..i]));
                    start = i + 1;
                }
                _ => {}
            }
        }
        if !s.is_empty() {
            codes.push(Direction::from_code(&s[start..]));
        }

        Self(codes)
    }
}

impl fmt::Display for DirectionCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            f.write_str(&d.code())?;
        }
        Ok(())
    }
}

impl From<DirectionCodes> for String {
    fn from(codes: DirectionCodes) -> Self {
        codes.to_string()
    }
}

impl From<String> for DirectionCodes {
    fn from(s: String) -> Self {
        DirectionCodes::parse(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_words_map_to_codes() {
        let cases = [
            ("North", "N"),
            ("South", "S"),
            ("East", "E"),
            ("West", "W"),
            ("Loop", "Loop"),
            ("Clockwise", "CW"),
            ("Counterclockwise", "CCW"),
        ];
        for (word, code) in cases {
            let d = Direction::from_word(word);
            assert!(d.is_recognized());
            assert_eq!(d.code(), code);
            assert_eq!(Direction::from_code(code), d);
        }
    }

    #[test]
    fn unknown_word_is_flagged() {
        let d = Direction::from_word("Inbound");
        assert_eq!(d, Direction::Unrecognized("Inbound".into()));
        assert!(!d.is_recognized());
        assert_eq!(d.to_string(), "? (Inbound)");
        assert_eq!(Direction::from_code("? (Inbound)"), d);
    }

    #[test]
    fn codes_join_with_hyphens() {
        let mut codes = DirectionCodes::new();
        codes.push(Direction::North);
        codes.push(Direction::South);
        assert_eq!(codes.to_string(), "N-S");
    }

    #[test]
    fn single_code_has_no_leading_hyphen() {
        let mut codes = DirectionCodes::new();
        codes.push(Direction::Loop);
        assert_eq!(codes.to_string(), "Loop");
    }

    #[test]
    fn parse_respects_parentheses() {
        let codes = DirectionCodes::parse("E-? (Up-Hill)-W");
        assert_eq!(
            codes.as_slice(),
            &[
                Direction::East,
                Direction::Unrecognized("Up-Hill".into()),
                Direction::West
            ]
        );
    }

    #[test]
    fn parse_empty() {
        assert!(DirectionCodes::parse("").is_empty());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&Direction::Counterclockwise).unwrap();
        assert_eq!(json, "\"CCW\"");

        let mut codes = DirectionCodes::new();
        codes.push(Direction::East);
        codes.push(Direction::West);
        let json = serde_json::to_string(&codes).unwrap();
        assert_eq!(json, "\"E-W\"");
        let back: DirectionCodes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, codes);
    }
}
