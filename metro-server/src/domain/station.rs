//! Station code and resolved-station types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::Line;

/// Error returned when parsing an invalid station platform code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 3-character platform code (e.g. "A01", "B35").
///
/// Codes are one uppercase ASCII letter followed by two ASCII digits. This
/// type guarantees that any `StationCode` value is valid by construction.
///
/// A physical station has one code per level: an interchange like Metro
/// Center is "A01" on the red line and "C01" on the blue/orange/silver
/// level. Codes therefore belong to a `(line, station)` pair, not to a
/// station alone.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationCode([u8; 3]);

impl StationCode {
    /// Parse a platform code from a string.
    ///
    /// The input must be exactly one uppercase ASCII letter followed by two
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidStationCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes[0].is_ascii_uppercase() {
            return Err(InvalidStationCode {
                reason: "must start with an uppercase ASCII letter",
            });
        }

        if !bytes[1].is_ascii_digit() || !bytes[2].is_ascii_digit() {
            return Err(InvalidStationCode {
                reason: "must end with two ASCII digits",
            });
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII letters and digits
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A station's placement on one line: its platform code and ordinal position.
///
/// Indices are only meaningful along a single line; comparing indices from
/// different lines says nothing about geography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
    /// Platform code on this line.
    pub code: StationCode,
    /// Ordinal position along this line.
    pub index: u32,
}

/// A resolved station: a display name plus its placement on every line it
/// serves.
///
/// Invariant: `lines` is never empty. The station directory is the only
/// production constructor and never resolves a station without at least one
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    name: String,
    lines: BTreeMap<Line, Platform>,
}

impl Station {
    /// Create a resolved station. `lines` must be non-empty.
    pub fn new(name: impl Into<String>, lines: BTreeMap<Line, Platform>) -> Self {
        let station = Self {
            name: name.into(),
            lines,
        };
        debug_assert!(!station.lines.is_empty(), "station must serve a line");
        station
    }

    /// Canonical display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines this station serves, in alphabetical order.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.lines.keys().copied()
    }

    /// True if this station sits on `line`.
    pub fn serves(&self, line: Line) -> bool {
        self.lines.contains_key(&line)
    }

    /// Placement on `line`, if served.
    pub fn platform(&self, line: Line) -> Option<&Platform> {
        self.lines.get(&line)
    }

    /// The alphabetically first line this station serves.
    pub fn first_line(&self) -> Line {
        *self
            .lines
            .keys()
            .next()
            .expect("station always serves at least one line")
    }

    /// Lines served by both this station and `other`, in alphabetical order.
    pub fn shared_lines(&self, other: &Station) -> Vec<Line> {
        self.lines().filter(|line| other.serves(*line)).collect()
    }

    /// True if this is the ambiguous "Farragut" short name: the rider's text
    /// matched both Farragut North and Farragut West, and no single display
    /// name could be chosen.
    pub fn is_ambiguous_farragut(&self) -> bool {
        self.name.eq_ignore_ascii_case("farragut")
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_code_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z][0-9]{2}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_code_string()) {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Any valid code can be parsed
        #[test]
        fn valid_always_parses(s in valid_code_string()) {
            prop_assert!(StationCode::parse(&s).is_ok());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[A-Z0-9]{0,2}|[A-Z0-9]{4,10}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// Lowercase leading letters are always rejected
        #[test]
        fn lowercase_rejected(s in "[a-z][0-9]{2}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
