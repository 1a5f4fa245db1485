//! Incident reports and their filtering.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::Line;

/// A service incident as reported by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    /// Free-text description shown to riders.
    pub description: String,
    /// Category, e.g. "Delay" or "Alert".
    pub kind: String,
    /// Lines the incident affects.
    pub lines: Vec<Line>,
    /// When the report was last updated, if the feed said.
    pub updated: Option<NaiveDateTime>,
}

impl Incident {
    /// True if the incident names `line` among its affected lines.
    pub fn affects(&self, line: Line) -> bool {
        self.lines.contains(&line)
    }

    /// True if this incident belongs to the category the rider asked about.
    ///
    /// Spoken categories are loose plurals ("delays", "alerts"); the match
    /// accepts any report whose type appears inside the spoken word, so
    /// "Delay" matches "delays".
    pub fn matches_kind(&self, spoken: &str) -> bool {
        let kind = self.kind.to_lowercase();
        !kind.is_empty() && spoken.to_lowercase().contains(&kind)
    }
}

/// Filter incidents by optional line and spoken category.
///
/// Order-preserving; both filters absent means everything is returned. The
/// generic category word "incidents" matches every report.
pub fn filter_incidents(
    incidents: &[Incident],
    line: Option<Line>,
    kind: Option<&str>,
) -> Vec<Incident> {
    incidents
        .iter()
        .filter(|incident| line.is_none_or(|l| incident.affects(l)))
        .filter(|incident| {
            kind.is_none_or(|k| {
                k.to_lowercase().contains("incident") || incident.matches_kind(k)
            })
        })
        .cloned()
        .collect()
}
