//! Filtering live arrivals against an itinerary.
//!
//! Each record runs through a fixed chain of predicates and the first
//! failure drops it. Sentinel (ghost / no-passenger) lines and unresolvable
//! termini are treated optimistically: if the feed cannot tell us where a
//! train is going, we cannot prove it is going the wrong way, so it stays.

use crate::domain::ArrivalRecord;
use crate::stations::StationDirectory;

use super::itinerary::Itinerary;

/// Keep the arrivals that could be the rider's train.
///
/// Order-preserving and pure: survivors appear exactly as the feed reported
/// them, in feed order.
pub fn filter_arrivals(
    records: &[ArrivalRecord],
    itinerary: &Itinerary,
    directory: &StationDirectory,
) -> Vec<ArrivalRecord> {
    records
        .iter()
        .filter(|record| admits(record, itinerary, directory))
        .cloned()
        .collect()
}

/// The predicate chain for one record.
fn admits(record: &ArrivalRecord, itinerary: &Itinerary, directory: &StationDirectory) -> bool {
    // No time info: nothing to report.
    if !record.has_time() {
        return false;
    }

    // Already boarding or arriving: not catchable.
    if record.is_imminent() {
        return false;
    }

    // Wrong line for the origin or the destination. Sentinel lines are
    // exempt: they carry no routing information to contradict.
    if let Some(line) = record.line.line() {
        if !itinerary.src.serves(line) {
            return false;
        }
        if let Some(dst) = &itinerary.dst {
            if !dst.serves(line) {
                return false;
            }
        }
    }

    // No destination means no directional requirement.
    let Some(geometry) = &itinerary.geometry else {
        return true;
    };

    // Place the train's stated terminus on its own line. A sentinel
    // terminus, a sentinel line, or a terminus the directory doesn't know
    // leaves the train's heading unknowable: keep it.
    if record.terminus_is_sentinel() {
        return true;
    }
    let Some(line) = record.line.line() else {
        return true;
    };
    let Some(terminus_index) = directory.index_on_line(line, &record.terminus) else {
        return true;
    };

    // The train must head the right way and at least as far as the rider.
    let trajectory = i64::from(terminus_index) - i64::from(geometry.src_index);
    geometry.direction.admits(trajectory)
        && geometry.stops_remaining.covered_by(trajectory.unsigned_abs() as u32)
}
