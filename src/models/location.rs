use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Ordered track of a course, in the order the source file listed it.
pub type TrackPath = Vec<Coordinate>;

/// Human-readable place for a coordinate. Every component the geocoder
/// did not report stays an empty string.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceRecord {
    pub name: String,
    pub iso_country_code: String,
    pub administrative_area: String,
    pub sub_administrative_area: String,
    pub locality: String,
    pub sub_locality: String,
    pub throughfare: String,
    pub sub_throughfare: String,
}
