//! Raw geocode records to ranked location candidates

use std::cmp::Ordering;

use crate::geonames::{RawGeoRecord, RawGeoResponse};
use crate::models::LocationCandidate;

/// One candidate per raw record, best score first.
///
/// Records without a score go after every scored record and keep their
/// upstream order; the sort is stable.
#[must_use]
pub fn build_candidate_table(raw: &RawGeoResponse) -> Vec<LocationCandidate> {
    let mut candidates: Vec<LocationCandidate> = raw.geonames.iter().map(candidate_from).collect();
    candidates.sort_by(|a, b| by_score_descending(a.score, b.score));
    candidates
}

#[must_use]
pub fn candidate_from(record: &RawGeoRecord) -> LocationCandidate {
    LocationCandidate {
        name: record.name().unwrap_or_default().to_string(),
        bounding_box: record.bounding_box(),
        admin_area: record.admin_area().unwrap_or_default().to_string(),
        country: record.country().unwrap_or_default().to_string(),
        score: record.score().unwrap_or(f64::NAN),
        lat: record.lat().unwrap_or(f64::NAN),
        lng: record.lng().unwrap_or(f64::NAN),
        wiki_link: record.wiki_link().map(str::to_string),
    }
}

fn by_score_descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
