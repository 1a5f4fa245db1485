//! Rail line types.
//!
//! Three views of "a line" exist in the system and they are deliberately
//! distinct types:
//!
//! - [`Line`] - one of the six revenue lines of the network
//! - [`FeedLine`] - what the live feed claims about a train, which may be a
//!   sentinel for ghost / no-passenger equipment moves
//! - [`LineChoice`] - what the rider said, which may be a ghost word or
//!   something we don't recognize at all

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six revenue lines.
///
/// Variants are declared in alphabetical order so that the derived `Ord`
/// gives a stable, documented tie-break wherever "pick one line" decisions
/// are made (see `Itinerary`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    Blue,
    Green,
    Orange,
    Red,
    Silver,
    Yellow,
}

impl Line {
    /// All lines, in alphabetical order.
    pub const ALL: [Line; 6] = [
        Line::Blue,
        Line::Green,
        Line::Orange,
        Line::Red,
        Line::Silver,
        Line::Yellow,
    ];

    /// Lowercase line name as spoken ("red", "blue", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Line::Blue => "blue",
            Line::Green => "green",
            Line::Orange => "orange",
            Line::Red => "red",
            Line::Silver => "silver",
            Line::Yellow => "yellow",
        }
    }

    /// Two-letter code used by the live feed.
    pub fn feed_code(&self) -> &'static str {
        match self {
            Line::Blue => "BL",
            Line::Green => "GR",
            Line::Orange => "OR",
            Line::Red => "RD",
            Line::Silver => "SV",
            Line::Yellow => "YL",
        }
    }

    /// Parse a feed line code ("RD", "BL", ...).
    pub fn from_feed_code(code: &str) -> Option<Line> {
        match code.trim() {
            "BL" => Some(Line::Blue),
            "GR" => Some(Line::Green),
            "OR" => Some(Line::Orange),
            "RD" => Some(Line::Red),
            "SV" => Some(Line::Silver),
            "YL" => Some(Line::Yellow),
            _ => None,
        }
    }

    /// Parse a spoken line name.
    ///
    /// Riders say things like "blue" or "blue line"; only the first word
    /// matters.
    pub fn parse_spoken(text: &str) -> Option<Line> {
        let first = text.split_whitespace().next()?;
        match first.to_lowercase().as_str() {
            "blue" => Some(Line::Blue),
            "green" => Some(Line::Green),
            "orange" => Some(Line::Orange),
            "red" => Some(Line::Red),
            "silver" => Some(Line::Silver),
            "yellow" => Some(Line::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The line field of a live arrival record.
///
/// Besides the six revenue lines the feed emits sentinel codes for trains
/// that are not in passenger service. Those records bypass line-membership
/// and directional filtering: we cannot say anything about where they are
/// going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedLine {
    /// A train on a revenue line.
    Revenue(Line),
    /// Blank, "--", or "Train": a ghost train with no stated route.
    Ghost,
    /// "No": a no-passenger equipment move.
    NoPassenger,
}

impl FeedLine {
    /// Parse the raw line code from a feed record.
    ///
    /// Returns `None` for codes the feed has never been observed to emit;
    /// callers surface those as an unknown-line failure rather than guessing.
    pub fn parse(code: &str) -> Option<FeedLine> {
        let code = code.trim();
        if let Some(line) = Line::from_feed_code(code) {
            return Some(FeedLine::Revenue(line));
        }
        match code {
            "" | "--" | "Train" => Some(FeedLine::Ghost),
            "No" => Some(FeedLine::NoPassenger),
            _ => None,
        }
    }

    /// The revenue line, if this is a revenue record.
    pub fn line(&self) -> Option<Line> {
        match self {
            FeedLine::Revenue(line) => Some(*line),
            _ => None,
        }
    }

    /// True for ghost and no-passenger sentinels.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, FeedLine::Ghost | FeedLine::NoPassenger)
    }
}

impl fmt::Display for FeedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedLine::Revenue(line) => write!(f, "{line} line"),
            FeedLine::Ghost => f.write_str("ghost train"),
            FeedLine::NoPassenger => f.write_str("no passenger train"),
        }
    }
}

/// Ghost words riders use for trains with no stated route.
const GHOST_WORDS: [&str; 4] = ["ghost", "train", "--", "no"];

/// A rider's spoken line constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChoice {
    /// A recognized revenue line.
    Real(Line),
    /// A ghost word: the rider is asking about ghost trains.
    Ghost,
    /// Something we don't recognize as a line. The text is kept so the
    /// presentation layer can echo it back.
    Unrecognized(String),
}

impl LineChoice {
    /// Parse spoken line text. Never fails: unrecognized text is preserved.
    pub fn parse(text: &str) -> LineChoice {
        let first = text.split_whitespace().next().unwrap_or("");
        if GHOST_WORDS.contains(&first.to_lowercase().as_str()) {
            return LineChoice::Ghost;
        }
        match Line::parse_spoken(text) {
            Some(line) => LineChoice::Real(line),
            None => LineChoice::Unrecognized(first.to_string()),
        }
    }

    /// True for the ghost sentinel.
    pub fn is_ghost(&self) -> bool {
        matches!(self, LineChoice::Ghost)
    }
}

impl fmt::Display for LineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineChoice::Real(line) => write!(f, "{line}"),
            LineChoice::Ghost => f.write_str("ghost"),
            LineChoice::Unrecognized(text) => f.write_str(text),
        }
    }
}
