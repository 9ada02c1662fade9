//! Nominatim HTTP client for forward and reverse geocoding

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{GeocoderError, Result};
use crate::types::{Location, ReverseResponse};

/// Host of the public Nominatim instance
const DEFAULT_DOMAIN: &str = "nominatim.openstreetmap.org";

/// Hard deadline for one request/response round trip
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The crate's own identifying value
///
/// Itself on the rejection list, so every application has to pick a value
/// of its own instead of shipping this one.
pub const DEFAULT_USER_AGENT: &str = "nominatim-geocoder-rs/0.1";

/// Placeholder user agents the public Nominatim service throttles or bans
const REJECTED_USER_AGENTS: [&str; 5] = [
    "my-application",
    "my_app/1",
    "my_user_agent/1.0",
    "specify_your_app_name_here",
    DEFAULT_USER_AGENT,
];

/// Construction-time settings for a [`Geocoder`]
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Host name of the Nominatim instance, optionally with a port
    pub domain: String,
    /// URL scheme, "https" or "http"
    pub scheme: String,
    /// Hard deadline covering connection and full response read
    pub timeout: Duration,
    /// Proxy URL per traffic class, keyed by "http", "https" or "all";
    /// a scheme-specific entry takes precedence over the "all" fallback
    pub proxies: HashMap<String, String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            scheme: "https".to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxies: HashMap::new(),
        }
    }
}

/// Client for the Nominatim `/search` and `/reverse` endpoints
///
/// Configuration is validated and fixed at construction; the underlying
/// HTTP transport is built once and shared, so a `Geocoder` can be used
/// from multiple tasks concurrently. Mutating the public fields afterwards
/// does not change the requests being sent.
#[derive(Debug)]
pub struct Geocoder {
    /// Host requests are sent to
    pub domain: String,
    /// URL scheme in use
    pub scheme: String,
    /// Identifying value sent as the User-Agent header on every request
    pub user_agent: String,
    /// Per-request deadline
    pub timeout: Duration,
    /// Configured proxies, empty when requests go out directly
    pub proxies: HashMap<String, String>,
    /// Resolved forward-search endpoint, `<scheme>://<domain>/search`
    pub search_url: String,
    /// Resolved reverse endpoint, `<scheme>://<domain>/reverse`
    pub reverse_url: String,
    http: reqwest::Client,
}

impl Geocoder {
    /// Create a geocoder for the public Nominatim instance
    ///
    /// Fails with [`GeocoderError::InvalidConfiguration`] if `user_agent`
    /// is empty or one of the generic placeholder values the service
    /// rejects. Nominatim's usage policy requires an application-specific
    /// identifier, so this is checked once here rather than per request.
    ///
    /// # Arguments
    /// * `user_agent` - Application-specific identifying value, e.g.
    ///   `"zip-code-locator/1.0"`
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(user_agent, GeocoderConfig::default())
    }

    /// Create a geocoder for a self-hosted Nominatim instance
    ///
    /// # Arguments
    /// * `user_agent` - Application-specific identifying value
    /// * `domain` - Host name of the instance, optionally with a port
    pub fn with_domain(user_agent: &str, domain: &str) -> Result<Self> {
        Self::with_config(
            user_agent,
            GeocoderConfig {
                domain: domain.to_string(),
                ..GeocoderConfig::default()
            },
        )
    }

    /// Create a geocoder with full control over the configuration
    pub fn with_config(user_agent: &str, config: GeocoderConfig) -> Result<Self> {
        if user_agent.is_empty() {
            return Err(GeocoderError::InvalidConfiguration(
                "user agent must not be empty".to_string(),
            ));
        }
        if REJECTED_USER_AGENTS.contains(&user_agent) {
            return Err(GeocoderError::InvalidConfiguration(format!(
                "user agent {user_agent:?} is a placeholder rejected by Nominatim"
            )));
        }

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent);
        for target in config.proxies.keys() {
            if !matches!(target.as_str(), "http" | "https" | "all") {
                return Err(GeocoderError::InvalidConfiguration(format!(
                    "unsupported proxy key {target:?}, expected \"http\", \"https\" or \"all\""
                )));
            }
        }
        // reqwest routes a request through the first registered proxy that
        // matches it, so the scheme-specific entries must be registered
        // ahead of the "all" fallback.
        for target in ["http", "https", "all"] {
            if let Some(proxy_url) = config.proxies.get(target) {
                let proxy = match target {
                    "http" => reqwest::Proxy::http(proxy_url.as_str()),
                    "https" => reqwest::Proxy::https(proxy_url.as_str()),
                    _ => reqwest::Proxy::all(proxy_url.as_str()),
                }
                .map_err(|e| {
                    GeocoderError::InvalidConfiguration(format!(
                        "invalid proxy URL for {target:?}: {e}"
                    ))
                })?;
                builder = builder.proxy(proxy);
            }
        }
        let http = builder.build().map_err(|e| {
            GeocoderError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
        })?;

        let search_url = format!("{}://{}/search", config.scheme, config.domain);
        let reverse_url = format!("{}://{}/reverse", config.scheme, config.domain);

        Ok(Self {
            domain: config.domain,
            scheme: config.scheme,
            user_agent: user_agent.to_string(),
            timeout: config.timeout,
            proxies: config.proxies,
            search_url,
            reverse_url,
            http,
        })
    }

    /// Forward geocode a query, returning the single best match
    ///
    /// Sends `limit=1`; if the service returns more than one result
    /// anyway, everything after the first is discarded.
    ///
    /// # Arguments
    /// * `query` - Search parameters understood by the `/search` endpoint,
    ///   e.g. "q", "city", "postalcode", "country"
    pub async fn geocode_one(&self, query: &HashMap<&str, &str>) -> Result<Location> {
        let mut locations = self.search(query, true).await?;
        Ok(locations.remove(0))
    }

    /// Forward geocode a query, returning every match
    ///
    /// Results keep the relevance order assigned by the service.
    ///
    /// # Arguments
    /// * `query` - Search parameters understood by the `/search` endpoint
    pub async fn geocode_many(&self, query: &HashMap<&str, &str>) -> Result<Vec<Location>> {
        self.search(query, false).await
    }

    /// Reverse geocode coordinates into the place containing them
    ///
    /// Always requests an address breakdown, so the returned
    /// [`Location::address`] map is populated on success.
    ///
    /// # Arguments
    /// * `latitude` - Degrees, positive north
    /// * `longitude` - Degrees, positive east
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location> {
        let mut params = BTreeMap::new();
        params.insert("lat".to_string(), format!("{latitude:.6}"));
        params.insert("lon".to_string(), format!("{longitude:.6}"));
        params.insert("format".to_string(), "jsonv2".to_string());
        params.insert("addressdetails".to_string(), "1".to_string());

        let url = construct_url(&self.reverse_url, &params);
        let body = self.make_request(&url).await?;

        let response: ReverseResponse = serde_json::from_str(&body)?;
        if let Some(ref message) = response.error {
            warn!(lat = latitude, lon = longitude, error = %message, "Nominatim returned error");
            return Err(GeocoderError::NoResults);
        }

        let location = response.into_location().ok_or_else(|| {
            GeocoderError::Decode(
                "reverse response is missing display_name, lat or lon".to_string(),
            )
        })?;

        debug!(
            lat = latitude,
            lon = longitude,
            display_name = %location.display_name,
            "Reverse geocoded coordinates"
        );

        Ok(location)
    }

    /// Shared forward-geocoding path for both result shapes
    async fn search(&self, query: &HashMap<&str, &str>, limit_one: bool) -> Result<Vec<Location>> {
        let mut params: BTreeMap<String, String> = query
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        // Only jsonv2 has a deterministic response shape; a caller-supplied
        // format is overridden.
        params.insert("format".to_string(), "jsonv2".to_string());
        if limit_one {
            params.insert("limit".to_string(), "1".to_string());
        }

        let url = construct_url(&self.search_url, &params);
        let body = self.make_request(&url).await?;

        let locations: Vec<Location> = serde_json::from_str(&body)?;
        if locations.is_empty() {
            return Err(GeocoderError::NoResults);
        }

        debug!(results = locations.len(), "Forward geocoding succeeded");
        Ok(locations)
    }

    /// Issue one GET request and return the raw response body
    ///
    /// The User-Agent, timeout, and proxies are properties of the shared
    /// client; no retries, no streaming.
    async fn make_request(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocoderError::RequestFailed(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Join a base endpoint and percent-encoded query parameters
///
/// Pairs are emitted in sorted key order, so a given parameter map always
/// produces the same URL.
fn construct_url(base: &str, params: &BTreeMap<String, String>) -> String {
    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect();
    format!("{}?{}", base, query.join("&"))
}
