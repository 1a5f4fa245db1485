//! The station directory: the immutable line/station graph.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{Line, Platform, Station, StationCode};

use super::dataset::{Dataset, DatasetError};
use super::matcher::{NameMatcher, SubstringMatcher};

/// One station's row on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    /// Platform code on this line.
    pub code: StationCode,
    /// Display name.
    pub name: String,
    /// Ordinal position along this line.
    pub index: u32,
}

/// Immutable map from line to its ordered stations.
///
/// Built once at startup from the static dataset and shared (behind an
/// `Arc`) by every request; nothing mutates it afterwards, so no locking is
/// needed.
pub struct StationDirectory {
    lines: BTreeMap<Line, Vec<StationRecord>>,
    matcher: Box<dyn NameMatcher>,
}

impl StationDirectory {
    /// Build a directory from a parsed dataset, with substring matching.
    ///
    /// Validates platform codes and rejects two stations claiming the same
    /// position on one line. Stations are stored in index order per line.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, DatasetError> {
        let mut lines = BTreeMap::new();

        for (line, entries) in dataset {
            let mut records: Vec<StationRecord> = Vec::with_capacity(entries.len());
            for (code, entry) in entries {
                let code = StationCode::parse(&code).map_err(|_| DatasetError::BadCode {
                    line,
                    code: code.clone(),
                })?;
                records.push(StationRecord {
                    code,
                    name: entry.name,
                    index: entry.index,
                });
            }

            records.sort_by_key(|r| r.index);
            for pair in records.windows(2) {
                if pair[0].index == pair[1].index {
                    return Err(DatasetError::DuplicateIndex {
                        line,
                        index: pair[0].index,
                    });
                }
            }

            lines.insert(line, records);
        }

        Ok(Self {
            lines,
            matcher: Box::new(SubstringMatcher),
        })
    }

    /// Replace the name-matching strategy.
    pub fn with_matcher(mut self, matcher: impl NameMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// The ordered stations of one line.
    pub fn stations_on(&self, line: Line) -> &[StationRecord] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lines present in the dataset, in alphabetical order.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.lines.keys().copied()
    }

    /// Total number of (line, station) rows.
    pub fn row_count(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    /// Find every line on which `name` matches a station, with the matched
    /// record for each.
    ///
    /// Lines are scanned in alphabetical order and each line's stations in
    /// index order. When a query matches more than one station on the same
    /// line the last one scanned (highest index) wins; that ambiguity is
    /// inherited behavior and is logged rather than rejected.
    pub fn lookup(&self, name: &str) -> BTreeMap<Line, &StationRecord> {
        let mut found = BTreeMap::new();

        for (line, records) in &self.lines {
            for record in records {
                if self.matcher.matches(name, &record.name) {
                    if let Some(previous) = found.insert(*line, record) {
                        debug!(
                            query = name,
                            line = %line,
                            dropped = %previous.name,
                            kept = %record.name,
                            "query matches several stations on one line"
                        );
                    }
                }
            }
        }

        found
    }

    /// Resolve a (normalized) name to a station.
    ///
    /// Returns `None` when nothing matches. When the matched records agree
    /// on a display name that name is used; when a short query hits distinct
    /// stations on different lines (the "Farragut" case) no single display
    /// name exists, so the query itself is kept, title-cased, and downstream
    /// validation disambiguates by context.
    pub fn resolve(&self, name: &str) -> Option<Station> {
        let found = self.lookup(name);
        if found.is_empty() {
            return None;
        }

        let mut display: Option<&str> = None;
        let mut unanimous = true;
        for record in found.values() {
            match display {
                None => display = Some(&record.name),
                Some(existing) if existing != record.name => unanimous = false,
                Some(_) => {}
            }
        }

        let resolved_name = if unanimous {
            display.unwrap_or(name).to_string()
        } else {
            debug!(query = name, "query matches distinct stations; keeping spoken form");
            title_case(name)
        };

        let lines = found
            .into_iter()
            .map(|(line, record)| {
                (
                    line,
                    Platform {
                        code: record.code,
                        index: record.index,
                    },
                )
            })
            .collect();

        Some(Station::new(resolved_name, lines))
    }

    /// Index of the station matching `name` on one specific line, if any.
    ///
    /// Used to place a feed record's stated terminus on the record's line.
    pub fn index_on_line(&self, line: Line, name: &str) -> Option<u32> {
        self.lookup(name).get(&line).map(|record| record.index)
    }
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::dataset::parse_dataset;

    fn directory() -> StationDirectory {
        let json = include_str!("../../data/stations.json");
        StationDirectory::from_dataset(parse_dataset(json).unwrap()).unwrap()
    }

    #[test]
    fn lookup_is_case_insensitive_substring() {
        let dir = directory();
        let found = dir.lookup("metro center");

        let lines: Vec<Line> = found.keys().copied().collect();
        assert_eq!(
            lines,
            vec![Line::Blue, Line::Orange, Line::Red, Line::Silver]
        );
        assert_eq!(found.get(&Line::Red).unwrap().index, 15);
        assert_eq!(found.get(&Line::Red).unwrap().code.as_str(), "A01");
        assert_eq!(found.get(&Line::Blue).unwrap().code.as_str(), "C01");
    }

    #[test]
    fn lookup_misses_return_empty() {
        let dir = directory();
        assert!(dir.lookup("atlantis").is_empty());
    }

    #[test]
    fn same_line_multi_match_keeps_last() {
        let dir = directory();
        // "falls church" hits West Falls Church (index 3) and East Falls
        // Church (index 4) on the orange line; the later row wins.
        let found = dir.lookup("falls church");
        assert_eq!(found.get(&Line::Orange).unwrap().name, "East Falls Church");
        assert_eq!(found.get(&Line::Silver).unwrap().name, "East Falls Church");
    }

    #[test]
    fn resolve_uses_matched_display_name() {
        let dir = directory();
        let station = dir.resolve("dupont").unwrap();
        assert_eq!(station.name(), "Dupont Circle");
        assert_eq!(station.platform(Line::Red).unwrap().index, 13);
        assert_eq!(station.lines().collect::<Vec<_>>(), vec![Line::Red]);
    }

    #[test]
    fn resolve_keeps_spoken_form_when_names_conflict() {
        let dir = directory();
        // "farragut" hits Farragut North (red) and Farragut West
        // (blue/orange/silver): no unanimous display name.
        let station = dir.resolve("farragut").unwrap();
        assert_eq!(station.name(), "Farragut");
        assert!(station.is_ambiguous_farragut());
        assert_eq!(
            station.lines().collect::<Vec<_>>(),
            vec![Line::Blue, Line::Orange, Line::Red, Line::Silver]
        );
        // The red entry is Farragut North's platform.
        assert_eq!(station.platform(Line::Red).unwrap().code.as_str(), "A02");
        assert_eq!(station.platform(Line::Blue).unwrap().code.as_str(), "C03");
    }

    #[test]
    fn resolve_miss_is_none() {
        let dir = directory();
        assert!(dir.resolve("atlantis").is_none());
    }

    #[test]
    fn index_on_line() {
        let dir = directory();
        assert_eq!(dir.index_on_line(Line::Red, "Glenmont"), Some(27));
        assert_eq!(dir.index_on_line(Line::Red, "Rosslyn"), None);
        assert_eq!(dir.index_on_line(Line::Blue, "Largo"), Some(27));
    }

    #[test]
    fn swapping_the_matcher_changes_semantics() {
        use crate::stations::matcher::ExactMatcher;

        let json = include_str!("../../data/stations.json");
        let dir = StationDirectory::from_dataset(parse_dataset(json).unwrap())
            .unwrap()
            .with_matcher(ExactMatcher);

        assert!(dir.lookup("dupont").is_empty());
        assert!(!dir.lookup("Dupont Circle").is_empty());
    }

    #[test]
    fn reject_duplicate_indices() {
        let json = r#"{
            "red": {
                "A01": { "name": "Metro Center", "index": 1 },
                "A02": { "name": "Farragut North", "index": 1 }
            }
        }"#;
        let err = StationDirectory::from_dataset(parse_dataset(json).unwrap());
        assert!(matches!(
            err,
            Err(DatasetError::DuplicateIndex {
                line: Line::Red,
                index: 1
            })
        ));
    }

    #[test]
    fn reject_bad_codes() {
        let json = r#"{
            "red": { "nope": { "name": "Metro Center", "index": 1 } }
        }"#;
        let err = StationDirectory::from_dataset(parse_dataset(json).unwrap());
        assert!(matches!(err, Err(DatasetError::BadCode { .. })));
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("farragut"), "Farragut");
        assert_eq!(title_case("u street"), "U Street");
        assert_eq!(title_case(""), "");
    }
}
