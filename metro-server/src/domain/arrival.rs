//! Live arrival records.

use super::FeedLine;

/// Minutes-field sentinel for a train currently boarding.
pub const MINUTES_BOARDING: &str = "BRD";

/// Minutes-field sentinel for a train arriving at the platform.
pub const MINUTES_ARRIVING: &str = "ARR";

/// One upcoming arrival as reported by the live feed.
///
/// Records are kept raw: the matcher inspects them but never rewrites them,
/// so whatever survives filtering is exactly what the feed said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalRecord {
    /// Line the train is running on, or a non-revenue sentinel.
    pub line: FeedLine,
    /// Stated terminus display name. May itself be a sentinel such as
    /// "Train" or "No Passenger" rather than a station.
    pub terminus: String,
    /// Minutes to arrival: a numeric string, "BRD"/"ARR", or absent.
    pub minutes: Option<String>,
}

impl ArrivalRecord {
    /// True if the feed supplied a non-empty minutes field.
    pub fn has_time(&self) -> bool {
        self.minutes.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// True if the train is boarding or arriving right now. Nobody catches
    /// those, so the matcher drops them.
    pub fn is_imminent(&self) -> bool {
        matches!(
            self.minutes.as_deref(),
            Some(MINUTES_BOARDING) | Some(MINUTES_ARRIVING)
        )
    }

    /// True if the stated terminus is a non-station sentinel rather than a
    /// real destination.
    pub fn terminus_is_sentinel(&self) -> bool {
        let lower = self.terminus.to_lowercase();
        lower == "train" || lower.starts_with("no passenger")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Line;

    fn record(line: FeedLine, terminus: &str, minutes: Option<&str>) -> ArrivalRecord {
        ArrivalRecord {
            line,
            terminus: terminus.to_string(),
            minutes: minutes.map(str::to_string),
        }
    }

    #[test]
    fn has_time() {
        assert!(record(FeedLine::Revenue(Line::Red), "Glenmont", Some("5")).has_time());
        assert!(!record(FeedLine::Revenue(Line::Red), "Glenmont", Some("")).has_time());
        assert!(!record(FeedLine::Revenue(Line::Red), "Glenmont", None).has_time());
    }

    #[test]
    fn imminent_sentinels() {
        assert!(record(FeedLine::Revenue(Line::Red), "Glenmont", Some("BRD")).is_imminent());
        assert!(record(FeedLine::Revenue(Line::Red), "Glenmont", Some("ARR")).is_imminent());
        assert!(!record(FeedLine::Revenue(Line::Red), "Glenmont", Some("1")).is_imminent());
        assert!(!record(FeedLine::Revenue(Line::Red), "Glenmont", None).is_imminent());
    }

    #[test]
    fn terminus_sentinels() {
        assert!(record(FeedLine::Ghost, "Train", Some("3")).terminus_is_sentinel());
        assert!(record(FeedLine::NoPassenger, "No Passenger", Some("3")).terminus_is_sentinel());
        assert!(!record(FeedLine::Revenue(Line::Red), "Glenmont", Some("3")).terminus_is_sentinel());
    }
}
