//! EA flood-monitoring API client.
//!
//! Handles URL construction and JSON response parsing for the two
//! real-time flood endpoints:
//!   http://environment.data.gov.uk/flood-monitoring/id/floodAreas
//!   http://environment.data.gov.uk/flood-monitoring/id/floods
//!
//! Both return an object with an `items` array. See `fixtures.rs` for
//! annotated examples of the response structures.

use crate::ingest::FloodSource;
use crate::model::FetchError;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde structures for response deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AreasResponse {
    items: Vec<AreaItem>,
}

#[derive(Deserialize)]
struct WarningsResponse {
    items: Vec<WarningItem>,
}

/// One item of the flood areas resource. All three fields are required;
/// a response item missing any of them fails the parse as a whole rather
/// than producing a partially populated area.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaItem {
    /// Stable area code, used as the table key.
    pub notation: String,
    /// Display label.
    pub label: String,
    pub description: String,
}

/// One item of the active flood warnings resource.
#[derive(Debug, Clone, Deserialize)]
pub struct WarningItem {
    /// Area code of the area this warning targets.
    #[serde(rename = "floodAreaID")]
    pub flood_area_id: String,
    pub message: String,
    /// Severity category label, e.g. `"Flood Warning"`.
    pub severity: String,
    /// Severity level, 1 = most severe.
    #[serde(rename = "severityLevel")]
    pub severity_level: u8,
    #[serde(rename = "timeRaised")]
    pub time_raised: String,
    #[serde(rename = "timeMessageChanged")]
    pub time_message_changed: String,
    #[serde(rename = "timeSeverityChanged")]
    pub time_severity_changed: String,
    #[serde(rename = "isTidal")]
    pub is_tidal: bool,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

const AREAS_BASE_URL: &str = "http://environment.data.gov.uk/flood-monitoring/id/floodAreas";
const FLOODS_BASE_URL: &str = "http://environment.data.gov.uk/flood-monitoring/id/floods";

/// Builds the flood areas URL for the given geographic filter.
///
/// The filter values are user-supplied strings and are percent-encoded
/// before substitution.
pub fn build_areas_url(latitude: &str, longitude: &str, distance: &str) -> String {
    format!(
        "{}?lat={}&long={}&dist={}",
        AREAS_BASE_URL,
        urlencoding::encode(latitude),
        urlencoding::encode(longitude),
        urlencoding::encode(distance)
    )
}

/// Builds the active flood warnings URL for the given geographic filter.
pub fn build_floods_url(latitude: &str, longitude: &str, distance: &str) -> String {
    format!(
        "{}?lat={}&long={}&dist={}",
        FLOODS_BASE_URL,
        urlencoding::encode(latitude),
        urlencoding::encode(longitude),
        urlencoding::encode(distance)
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a flood areas response body into its items.
///
/// An empty `items` array is not an error — a remote filter can simply
/// match no areas.
///
/// # Errors
/// `FetchError::Parse` — malformed JSON, missing envelope, or an item
/// missing a required field.
pub fn parse_areas_response(json: &str) -> Result<Vec<AreaItem>, FetchError> {
    let response: AreasResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;
    Ok(response.items)
}

/// Parses an active flood warnings response body into its items.
///
/// An empty `items` array is the normal quiet-period case, not an error.
///
/// # Errors
/// `FetchError::Parse` — malformed JSON, missing envelope, or an item
/// missing a required field.
pub fn parse_floods_response(json: &str) -> Result<Vec<WarningItem>, FetchError> {
    let response: WarningsResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;
    Ok(response.items)
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Production [`FloodSource`] backed by the EA flood-monitoring API.
///
/// Holds the geographic filter captured at session setup; the filter is
/// immutable for the life of the client. No credentials are required by
/// the upstream API.
pub struct EaClient {
    http: reqwest::Client,
    latitude: String,
    longitude: String,
    distance: String,
}

impl EaClient {
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        distance: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("floodwarn_service/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("failed to build HTTP client"),
            latitude: latitude.into(),
            longitude: longitude.into(),
            distance: distance.into(),
        }
    }

    /// Performs one GET and returns the body, mapping non-2xx statuses to
    /// `FetchError::Status`. No retries; the coordinator's cycle timeout
    /// bounds the overall wait.
    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        debug!("Endpoint URL = {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl FloodSource for EaClient {
    async fn fetch_areas(&self) -> Result<Vec<AreaItem>, FetchError> {
        let url = build_areas_url(&self.latitude, &self.longitude, &self.distance);
        let body = self.get_body(&url).await?;
        parse_areas_response(&body)
    }

    async fn fetch_warnings(&self) -> Result<Vec<WarningItem>, FetchError> {
        let url = build_floods_url(&self.latitude, &self.longitude, &self.distance);
        let body = self.get_body(&url).await?;
        parse_floods_response(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
