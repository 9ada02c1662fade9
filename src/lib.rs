//! Forward and reverse geocoding client for the
//! [Nominatim](https://nominatim.org/) API
//!
//! One request/response round trip per lookup: build the query URL, send
//! a GET with a mandatory application-specific User-Agent, decode the
//! JSON reply into a typed [`Location`]. There is no caching and no retry
//! logic; callers that need them wrap this client themselves.
//!
//! Public Nominatim instances reject generic User-Agent values, so
//! construction fails up front unless an application-specific identifier
//! is supplied.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! use nominatim_geocoder::Geocoder;
//!
//! # async fn example() -> Result<(), nominatim_geocoder::GeocoderError> {
//! let geocoder = Geocoder::new("zip-code-locator/1.0")?;
//!
//! // Forward: postal code to coordinates
//! let query = HashMap::from([("postalcode", "90210"), ("country", "US")]);
//! let location = geocoder.geocode_one(&query).await?;
//! println!("{} ({}, {})", location.display_name, location.lat, location.lon);
//!
//! // Reverse: coordinates to the containing place
//! let place = geocoder.reverse(34.0736, -118.4004).await?;
//! println!("{}", place.display_name);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /search` - forward geocoding; [`Geocoder::geocode_one`] returns
//!   the best match, [`Geocoder::geocode_many`] every match in the
//!   service's relevance order
//! - `GET /reverse` - reverse geocoding via [`Geocoder::reverse`], always
//!   with an address breakdown

mod client;
mod error;
mod types;

pub use client::{Geocoder, GeocoderConfig, DEFAULT_USER_AGENT};
pub use error::{GeocoderError, Result};
pub use types::Location;
