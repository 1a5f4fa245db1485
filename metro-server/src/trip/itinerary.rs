//! Itinerary validation and trip geometry.
//!
//! An [`Itinerary`] is the validated form of "from here, maybe to there,
//! maybe on this line". Construction is a single pass of checks that stops
//! at the first failure; a value of this type therefore always describes a
//! trip the network can actually carry (or a destination-less platform
//! query).

use crate::domain::{Line, LineChoice, Platform, Station, TripError};
use crate::stations::StationDirectory;

/// Direction of travel along a line, in index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher indices.
    Positive,
    /// Toward lower indices.
    Negative,
    /// Origin and destination coincide (never survives validation).
    NoMovement,
    /// Direction is unknowable (ghost-line request); accept either way.
    Any,
}

impl Direction {
    /// Classify a signed index difference.
    pub fn of(delta: i64) -> Direction {
        match delta {
            0 => Direction::NoMovement,
            d if d > 0 => Direction::Positive,
            _ => Direction::Negative,
        }
    }

    /// Whether a candidate trajectory moves the right way.
    pub fn admits(&self, trajectory: i64) -> bool {
        match self {
            Direction::Any => true,
            Direction::Positive => trajectory > 0,
            Direction::Negative => trajectory < 0,
            Direction::NoMovement => trajectory == 0,
        }
    }

    /// The opposite direction. `Any` and `NoMovement` are their own
    /// inverses.
    pub fn inverse(&self) -> Direction {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
            other => *other,
        }
    }
}

/// How many stops remain to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stops {
    /// Index distance along the shared line.
    Exact(u32),
    /// Ghost-line request: distance is unknowable, every train "goes far
    /// enough".
    Ghost,
}

impl Stops {
    /// Whether a train travelling `distance` stops covers the trip.
    pub fn covered_by(&self, distance: u32) -> bool {
        match self {
            Stops::Exact(needed) => distance >= *needed,
            Stops::Ghost => true,
        }
    }
}

/// Derived trip geometry, present only when a destination was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    /// The line the trip rides, shared by both endpoints.
    pub shared_line: Line,
    /// Origin index on the shared line.
    pub src_index: u32,
    /// Destination index on the shared line.
    pub dst_index: u32,
    /// Required direction of travel.
    pub direction: Direction,
    /// Required remaining distance.
    pub stops_remaining: Stops,
}

/// A validated trip request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    pub src: Station,
    pub dst: Option<Station>,
    pub line: Option<LineChoice>,
    pub geometry: Option<Geometry>,
}

impl Itinerary {
    /// Validate a (source, destination?, line?) triple and derive the trip
    /// geometry.
    ///
    /// Checks run in a fixed order and the first failure is terminal:
    /// spoken line serves the origin, spoken line serves the destination,
    /// Farragut disambiguation, the endpoints share a line, the endpoints
    /// differ. Ghost line words skip the line-membership checks and yield
    /// direction `Any` with unknowable distance.
    pub fn build(
        src: Station,
        dst: Option<Station>,
        line: Option<LineChoice>,
        directory: &StationDirectory,
    ) -> Result<Itinerary, TripError> {
        match &line {
            Some(LineChoice::Real(l)) if !src.serves(*l) => {
                return Err(TripError::SrcLine {
                    station: src.name().to_string(),
                    line: l.to_string(),
                });
            }
            Some(LineChoice::Unrecognized(text)) => {
                return Err(TripError::SrcLine {
                    station: src.name().to_string(),
                    line: text.clone(),
                });
            }
            _ => {}
        }

        let Some(dst) = dst else {
            return Ok(Itinerary {
                src,
                dst: None,
                line,
                geometry: None,
            });
        };

        if let Some(LineChoice::Real(l)) = &line {
            if !dst.serves(*l) {
                return Err(TripError::DstLine {
                    station: dst.name().to_string(),
                    line: l.to_string(),
                });
            }
        }

        let (src, dst) = disambiguate_farragut(src, dst, line.as_ref(), directory);

        let shared = src.shared_lines(&dst);
        let Some(first_shared) = shared.first() else {
            return Err(TripError::StationIntersection {
                src: src.name().to_string(),
                dst: dst.name().to_string(),
            });
        };

        if src.name() == dst.name() {
            return Err(TripError::SameStation(src.name().to_string()));
        }

        // A real spoken line is the trip's line; otherwise the tie-break is
        // the alphabetically first shared line. (The shared-line choice was
        // historically whatever a hash map yielded first; the alphabetical
        // rule is the deterministic replacement.)
        let shared_line = match &line {
            Some(LineChoice::Real(l)) => *l,
            _ => *first_shared,
        };

        let (src_index, dst_index) = match (src.platform(shared_line), dst.platform(shared_line)) {
            (Some(s), Some(d)) => (s.index, d.index),
            // shared_line came from the intersection of both stations
            _ => unreachable!("shared line serves both endpoints"),
        };

        let ghost_request = matches!(line, Some(LineChoice::Ghost));
        let delta = i64::from(dst_index) - i64::from(src_index);

        let geometry = Geometry {
            shared_line,
            src_index,
            dst_index,
            direction: if ghost_request {
                Direction::Any
            } else {
                Direction::of(delta)
            },
            stops_remaining: if ghost_request {
                Stops::Ghost
            } else {
                Stops::Exact(delta.unsigned_abs() as u32)
            },
        };

        Ok(Itinerary {
            src,
            dst: Some(dst),
            line,
            geometry: Some(geometry),
        })
    }

    /// The origin platform whose feed should be queried: the spoken line's
    /// platform when one was given, else the shared line's, else the
    /// alphabetically first line the origin serves.
    pub fn boarding_platform(&self) -> &Platform {
        let line = match &self.line {
            Some(LineChoice::Real(l)) => *l,
            _ => match &self.geometry {
                Some(geometry) => geometry.shared_line,
                None => self.src.first_line(),
            },
        };
        self.src
            .platform(line)
            .expect("boarding line is always served by the origin")
    }
}

/// Resolve the ambiguous "Farragut" short name on either endpoint.
///
/// A real spoken line decides directly (red means Farragut North,
/// blue/orange/silver mean Farragut West). Without one, the *other*
/// endpoint's lines decide, red first. The destination is resolved before
/// the origin so that an ambiguous origin can use the destination's settled
/// lines. If neither rule applies the name is left ambiguous and the
/// intersection check reports the mismatch.
fn disambiguate_farragut(
    src: Station,
    dst: Station,
    line: Option<&LineChoice>,
    directory: &StationDirectory,
) -> (Station, Station) {
    if !src.is_ambiguous_farragut() && !dst.is_ambiguous_farragut() {
        return (src, dst);
    }

    let dst = if dst.is_ambiguous_farragut() {
        rename_farragut(line, &src, directory).unwrap_or(dst)
    } else {
        dst
    };

    let src = if src.is_ambiguous_farragut() {
        rename_farragut(line, &dst, directory).unwrap_or(src)
    } else {
        src
    };

    (src, dst)
}

fn rename_farragut(
    line: Option<&LineChoice>,
    other: &Station,
    directory: &StationDirectory,
) -> Option<Station> {
    let chosen = match line {
        Some(LineChoice::Real(l)) => farragut_for_line(*l),
        _ => {
            if other.serves(Line::Red) {
                Some("farragut north")
            } else if other.serves(Line::Blue)
                || other.serves(Line::Orange)
                || other.serves(Line::Silver)
            {
                Some("farragut west")
            } else {
                None
            }
        }
    }?;

    directory.resolve(chosen)
}

fn farragut_for_line(line: Line) -> Option<&'static str> {
    match line {
        Line::Red => Some("farragut north"),
        Line::Blue | Line::Orange | Line::Silver => Some("farragut west"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::parse_dataset;

    fn directory() -> StationDirectory {
        let json = include_str!("../../data/stations.json");
        StationDirectory::from_dataset(parse_dataset(json).unwrap()).unwrap()
    }

    fn resolve(dir: &StationDirectory, name: &str) -> Station {
        dir.resolve(name)
            .unwrap_or_else(|| panic!("{name} should resolve"))
    }

    #[test]
    fn shared_red_trip_heading_outbound() {
        let dir = directory();
        let itinerary = Itinerary::build(
            resolve(&dir, "metro center"),
            Some(resolve(&dir, "tenleytown")),
            None,
            &dir,
        )
        .unwrap();

        let geometry = itinerary.geometry.unwrap();
        assert_eq!(geometry.shared_line, Line::Red);
        assert_eq!(geometry.src_index, 15);
        assert_eq!(geometry.dst_index, 9);
        assert_eq!(geometry.direction, Direction::Negative);
        assert_eq!(geometry.stops_remaining, Stops::Exact(6));
    }

    #[test]
    fn shared_red_trip_heading_inbound() {
        let dir = directory();
        let itinerary = Itinerary::build(
            resolve(&dir, "dupont circle"),
            Some(resolve(&dir, "noma")),
            None,
            &dir,
        )
        .unwrap();

        let geometry = itinerary.geometry.unwrap();
        assert_eq!(geometry.shared_line, Line::Red);
        assert_eq!(geometry.direction, Direction::Positive);
        assert_eq!(geometry.stops_remaining, Stops::Exact(6));
    }

    #[test]
    fn disconnected_endpoints_fail() {
        let dir = directory();
        let err = Itinerary::build(
            resolve(&dir, "silver spring"),
            Some(resolve(&dir, "pentagon")),
            None,
            &dir,
        )
        .unwrap_err();

        assert_eq!(
            err,
            TripError::StationIntersection {
                src: "Silver Spring".into(),
                dst: "Pentagon".into(),
            }
        );
    }

    #[test]
    fn disconnected_endpoints_fail_even_with_a_line_hint() {
        let dir = directory();
        // Both serve yellow? No: Silver Spring is red-only, so the hint
        // fails the origin check first, which is still a terminal error.
        let err = Itinerary::build(
            resolve(&dir, "silver spring"),
            Some(resolve(&dir, "pentagon")),
            Some(LineChoice::Real(Line::Yellow)),
            &dir,
        )
        .unwrap_err();
        assert!(matches!(err, TripError::SrcLine { .. }));
    }

    #[test]
    fn same_station_fails() {
        let dir = directory();
        let err = Itinerary::build(
            resolve(&dir, "metro center"),
            Some(resolve(&dir, "metro center")),
            Some(LineChoice::Real(Line::Red)),
            &dir,
        )
        .unwrap_err();
        assert_eq!(err, TripError::SameStation("Metro Center".into()));
    }

    #[test]
    fn spoken_line_must_serve_origin() {
        let dir = directory();
        let err = Itinerary::build(
            resolve(&dir, "rosslyn"),
            Some(resolve(&dir, "metro center")),
            Some(LineChoice::Real(Line::Red)),
            &dir,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TripError::SrcLine {
                station: "Rosslyn".into(),
                line: "red".into(),
            }
        );
    }

    #[test]
    fn spoken_line_must_serve_destination() {
        let dir = directory();
        let err = Itinerary::build(
            resolve(&dir, "metro center"),
            Some(resolve(&dir, "rosslyn")),
            Some(LineChoice::Real(Line::Red)),
            &dir,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TripError::DstLine {
                station: "Rosslyn".into(),
                line: "red".into(),
            }
        );
    }

    #[test]
    fn unrecognized_line_reports_origin_mismatch() {
        let dir = directory();
        let err = Itinerary::build(
            resolve(&dir, "metro center"),
            None,
            Some(LineChoice::parse("purple line")),
            &dir,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TripError::SrcLine {
                station: "Metro Center".into(),
                line: "purple".into(),
            }
        );
    }

    #[test]
    fn farragut_follows_the_spoken_line() {
        let dir = directory();

        let itinerary = Itinerary::build(
            resolve(&dir, "farragut"),
            Some(resolve(&dir, "metro center")),
            Some(LineChoice::Real(Line::Red)),
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.src.name(), "Farragut North");

        let itinerary = Itinerary::build(
            resolve(&dir, "farragut"),
            Some(resolve(&dir, "metro center")),
            Some(LineChoice::Real(Line::Blue)),
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.src.name(), "Farragut West");
    }

    #[test]
    fn farragut_follows_the_other_endpoint_without_a_line() {
        let dir = directory();

        // Union Station is red-only: the ambiguous origin must be the red
        // line's Farragut.
        let itinerary = Itinerary::build(
            resolve(&dir, "farragut"),
            Some(resolve(&dir, "union station")),
            None,
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.src.name(), "Farragut North");

        // Smithsonian is blue/orange/silver.
        let itinerary = Itinerary::build(
            resolve(&dir, "farragut"),
            Some(resolve(&dir, "smithsonian")),
            None,
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.src.name(), "Farragut West");

        // As a destination the same rule applies.
        let itinerary = Itinerary::build(
            resolve(&dir, "union station"),
            Some(resolve(&dir, "farragut")),
            None,
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.dst.unwrap().name(), "Farragut North");
    }

    #[test]
    fn built_itineraries_never_keep_the_short_farragut_name() {
        let dir = directory();
        let itinerary = Itinerary::build(
            resolve(&dir, "farragut"),
            Some(resolve(&dir, "glenmont")),
            None,
            &dir,
        )
        .unwrap();
        assert!(!itinerary.src.is_ambiguous_farragut());
        assert!(!itinerary.dst.as_ref().unwrap().is_ambiguous_farragut());
    }

    #[test]
    fn ghost_line_request_has_no_direction() {
        let dir = directory();
        let itinerary = Itinerary::build(
            resolve(&dir, "metro center"),
            Some(resolve(&dir, "rosslyn")),
            Some(LineChoice::Ghost),
            &dir,
        )
        .unwrap();

        let geometry = itinerary.geometry.unwrap();
        assert_eq!(geometry.direction, Direction::Any);
        assert_eq!(geometry.stops_remaining, Stops::Ghost);
        // Geometry still picks the deterministic shared line.
        assert_eq!(geometry.shared_line, Line::Blue);
    }

    #[test]
    fn shared_line_tie_break_is_alphabetical() {
        let dir = directory();
        // Metro Center -> Smithsonian share blue, orange and silver.
        let itinerary = Itinerary::build(
            resolve(&dir, "metro center"),
            Some(resolve(&dir, "smithsonian")),
            None,
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.geometry.unwrap().shared_line, Line::Blue);
    }

    #[test]
    fn destinationless_query_has_no_geometry() {
        let dir = directory();
        let itinerary =
            Itinerary::build(resolve(&dir, "brookland"), None, None, &dir).unwrap();
        assert!(itinerary.geometry.is_none());
        assert!(itinerary.dst.is_none());
    }

    #[test]
    fn boarding_platform_prefers_spoken_then_shared_then_first() {
        let dir = directory();

        // Spoken line wins.
        let itinerary = Itinerary::build(
            resolve(&dir, "metro center"),
            None,
            Some(LineChoice::Real(Line::Red)),
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.boarding_platform().code.as_str(), "A01");

        // Shared line next.
        let itinerary = Itinerary::build(
            resolve(&dir, "metro center"),
            Some(resolve(&dir, "tenleytown")),
            None,
            &dir,
        )
        .unwrap();
        assert_eq!(itinerary.boarding_platform().code.as_str(), "A01");

        // Neither: alphabetically first line the origin serves (blue).
        let itinerary =
            Itinerary::build(resolve(&dir, "metro center"), None, None, &dir).unwrap();
        assert_eq!(itinerary.boarding_platform().code.as_str(), "C01");
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::of(3), Direction::Positive);
        assert_eq!(Direction::of(-2), Direction::Negative);
        assert_eq!(Direction::of(0), Direction::NoMovement);

        assert!(Direction::Any.admits(5));
        assert!(Direction::Any.admits(-5));
        assert!(Direction::Positive.admits(1));
        assert!(!Direction::Positive.admits(-1));
        assert!(!Direction::Negative.admits(0));

        assert_eq!(Direction::Positive.inverse(), Direction::Negative);
        assert_eq!(Direction::Any.inverse(), Direction::Any);
    }

    #[test]
    fn stops_coverage() {
        assert!(Stops::Exact(4).covered_by(4));
        assert!(Stops::Exact(4).covered_by(9));
        assert!(!Stops::Exact(4).covered_by(3));
        assert!(Stops::Ghost.covered_by(0));
    }
}
