//! Reverse geocoding through the Google Geocoding API.
//!
//! ## Setup
//! 1. Enable the Geocoding API for the project in Google Cloud Console
//! 2. Set the environment variable: `GOOGLE_MAPS_API_KEY=your_api_key_here`
//!
//! Resolution is best-effort enrichment of a course draft: every failure
//! (transport, non-2xx, undecodable body, no results) is logged and
//! reported to the caller as "no place". There is no caching and no retry;
//! one call per upload.

use log::warn;
use serde::Deserialize;
use std::time::Duration;

use crate::models::location::{Coordinate, PlaceRecord};

pub trait PlaceResolver {
    async fn resolve(&self, coordinate: Coordinate) -> Option<PlaceRecord>;
}

#[derive(Debug)]
pub enum ResolutionUnavailable {
    Transport(String),
    Status(u16),
    Decode(String),
    NoResults,
}

impl std::fmt::Display for ResolutionUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionUnavailable::Transport(err) => write!(f, "Geocoding request failed: {}", err),
            ResolutionUnavailable::Status(code) => write!(f, "Geocoding API returned {}", code),
            ResolutionUnavailable::Decode(err) => {
                write!(f, "Failed to parse geocoding response: {}", err)
            }
            ResolutionUnavailable::NoResults => write!(f, "Geocoding returned no results"),
        }
    }
}

impl std::error::Error for ResolutionUnavailable {}

#[derive(Debug, Deserialize, Default)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AddressComponent {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
}

impl GeocodeResult {
    fn component(&self, tag: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|component| component.types.iter().any(|t| t == tag))
    }

    fn long_name(&self, tag: &str) -> String {
        self.component(tag)
            .map(|component| component.long_name.clone())
            .unwrap_or_default()
    }

    /// Flattens the provider's components into a [`PlaceRecord`]. The
    /// country code is the component's short (ISO) name; every other field
    /// is the long name.
    pub fn to_place_record(&self) -> PlaceRecord {
        PlaceRecord {
            name: self.formatted_address.clone(),
            iso_country_code: self
                .component("country")
                .map(|component| component.short_name.clone())
                .unwrap_or_default(),
            administrative_area: self.long_name("administrative_area_level_1"),
            sub_administrative_area: self.long_name("administrative_area_level_2"),
            locality: self.long_name("locality"),
            sub_locality: self.long_name("sublocality"),
            throughfare: self.long_name("route"),
            sub_throughfare: self.long_name("street_number"),
        }
    }
}

impl GeocodeResponse {
    pub fn first_place(&self) -> Option<PlaceRecord> {
        self.results.first().map(GeocodeResult::to_place_record)
    }
}

pub struct GoogleGeocoder {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn fetch_place(&self, coordinate: Coordinate) -> Result<PlaceRecord, ResolutionUnavailable> {
        let latlng = format!("{},{}", coordinate.latitude, coordinate.longitude);

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("latlng", latlng.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ResolutionUnavailable::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResolutionUnavailable::Status(response.status().as_u16()));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ResolutionUnavailable::Decode(e.to_string()))?;

        body.first_place().ok_or(ResolutionUnavailable::NoResults)
    }
}

impl PlaceResolver for GoogleGeocoder {
    async fn resolve(&self, coordinate: Coordinate) -> Option<PlaceRecord> {
        match self.fetch_place(coordinate).await {
            Ok(place) => Some(place),
            Err(e) => {
                warn!(
                    "Could not resolve ({:.5}, {:.5}): {}",
                    coordinate.latitude, coordinate.longitude, e
                );
                None
            }
        }
    }
}
