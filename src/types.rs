//! Data types for Nominatim responses

use std::collections::HashMap;

use serde::Deserialize;

/// A geocoded place as returned by the search and reverse endpoints
///
/// Coordinates stay the strings the service sent, preserving its textual
/// precision. The address map is only present when the service included an
/// address breakdown (reverse lookups always request one).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    pub address: Option<HashMap<String, serde_json::Value>>,
}

/// Wire shape of a `/reverse` reply
///
/// Carries either a location or the service's explicit error payload
/// (e.g. `{"error": "Unable to geocode"}`), so every field is optional.
#[derive(Debug, Deserialize)]
pub(crate) struct ReverseResponse {
    pub(crate) error: Option<String>,
    pub(crate) display_name: Option<String>,
    pub(crate) lat: Option<String>,
    pub(crate) lon: Option<String>,
    pub(crate) address: Option<HashMap<String, serde_json::Value>>,
}

impl ReverseResponse {
    /// Convert into a [`Location`], or `None` if a required field is missing
    pub(crate) fn into_location(self) -> Option<Location> {
        Some(Location {
            display_name: self.display_name?,
            lat: self.lat?,
            lon: self.lon?,
            address: self.address,
        })
    }
}
