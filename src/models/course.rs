use serde::{Deserialize, Deserializer, Serialize};

use crate::models::location::{Coordinate, PlaceRecord, TrackPath};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    #[default]
    Normal,
    Hard,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alley {
    #[default]
    None,
    Few,
    Lots,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailSlot {
    #[serde(rename = "thumbnail")]
    Main,
    #[serde(rename = "thumbnailNeon")]
    Neon,
    #[serde(rename = "thumbnailLong")]
    Long,
}

impl ThumbnailSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailSlot::Main => "thumbnail",
            ThumbnailSlot::Neon => "thumbnailNeon",
            ThumbnailSlot::Long => "thumbnailLong",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HotSpot {
    pub title: String,
    pub spot_description: String,
    #[serde(deserialize_with = "deserialize_form_coordinate")]
    pub location: Coordinate,
}

impl HotSpot {
    /// Applies the form's `"longitude, latitude"` text. A component that
    /// does not parse keeps its previous value.
    pub fn set_location_text(&mut self, text: &str) {
        let mut parts = text.split(',').map(|part| part.trim().parse::<f64>());

        if let Some(Ok(longitude)) = parts.next() {
            if longitude.is_finite() {
                self.location.longitude = longitude;
            }
        }
        if let Some(Ok(latitude)) = parts.next() {
            if latitude.is_finite() {
                self.location.latitude = latitude;
            }
        }
    }
}

// Form inputs were stored as whatever the browser handed back, so lengths
// and durations show up both as numbers and as numeric strings.
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(serde_json::Value::String(s)) => Ok(s.trim().parse().unwrap_or(0.0)),
        _ => Ok(0.0),
    }
}

// A blank hot spot was saved as `{ "longitude": "", "latitude": "" }`.
#[derive(Deserialize, Default)]
#[serde(default)]
struct FormCoordinate {
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    latitude: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    longitude: f64,
}

fn deserialize_form_coordinate<'de, D>(deserializer: D) -> Result<Coordinate, D::Error>
where
    D: Deserializer<'de>,
{
    let form: Option<FormCoordinate> = Option::deserialize(deserializer)?;
    let form = form.unwrap_or_default();
    Ok(Coordinate::new(form.latitude, form.longitude))
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub course_name: String,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub course_length: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub course_duration: f64,
    pub description: String,
    pub region_display_name: String,
    pub producer: String,
    pub thumbnail: String,
    pub thumbnail_neon: String,
    pub thumbnail_long: String,
    pub course_paths: TrackPath,
    pub location_info: Option<PlaceRecord>,
    pub level: Level,
    pub alley: Alley,
    pub hot_spots: Vec<HotSpot>,
}

impl Course {
    /// The blank "add course" form: one empty hot spot ready to fill in.
    pub fn new_draft() -> Self {
        Self {
            hot_spots: vec![HotSpot::default()],
            ..Default::default()
        }
    }

    pub fn add_hot_spot(&mut self) {
        self.hot_spots.push(HotSpot::default());
    }

    pub fn set_thumbnail(&mut self, slot: ThumbnailSlot, url: String) {
        match slot {
            ThumbnailSlot::Main => self.thumbnail = url,
            ThumbnailSlot::Neon => self.thumbnail_neon = url,
            ThumbnailSlot::Long => self.thumbnail_long = url,
        }
    }
}
