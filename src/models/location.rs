//! Geocoded location candidates and their bounding boxes

use serde::Serialize;

/// Search rectangle in degrees
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct BBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BBox {
    /// Stand-in for candidates without a box, so the station query still runs
    pub const DEGENERATE: BBox = BBox {
        north: 0.0,
        south: 0.0,
        east: 0.0,
        west: 0.0,
    };

    /// Build a box, returning `None` unless every edge is finite and north >= south
    #[must_use]
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Option<Self> {
        let all_finite = [north, south, east, west].iter().all(|v| v.is_finite());
        (all_finite && north >= south).then_some(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Boxes spanning the 180th meridian are not split; the station query
    /// receives the edges as-is.
    #[must_use]
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        *self == Self::DEGENERATE
    }
}

/// One geocode match for a place-name query
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LocationCandidate {
    pub name: String,
    pub bounding_box: Option<BBox>,
    /// First-level administrative division (region, state, province)
    pub admin_area: String,
    pub country: String,
    /// Relevance; only comparable within one query. NaN when not reported.
    pub score: f64,
    pub lat: f64,
    pub lng: f64,
    pub wiki_link: Option<String>,
}

impl LocationCandidate {
    /// "Name, Admin area, Country" without the blank parts
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.name, &self.admin_area, &self.country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Box to query stations with, falling back to the degenerate box
    #[must_use]
    pub fn search_box(&self) -> BBox {
        self.bounding_box.unwrap_or(BBox::DEGENERATE)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}
