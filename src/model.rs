//! Shared data types for the flood warning service.
//!
//! The merged area table published by the coordinator is built from two
//! upstream resources: flood *areas* (stable membership, fetched once per
//! session) and active flood *warnings* (fetched every cycle). The types
//! here are the normalized forms of both, plus the error taxonomy used
//! across the fetch and update layers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Severity catalogue
// ---------------------------------------------------------------------------

/// Returns the EA's label for a warning severity level, or `None` for a
/// level outside the published catalogue. Lower levels are more severe.
pub fn severity_label(severity_level: u8) -> Option<&'static str> {
    match severity_level {
        1 => Some("Severe Flood Warning"),
        2 => Some("Flood Warning"),
        3 => Some("Flood Alert"),
        4 => Some("Warning no Longer in Force"),
        _ => None,
    }
}

/// Derives the service risk level from an upstream severity level.
///
/// The EA API uses 1 = most severe; the service inverts this so that 0 means
/// no risk and larger numbers are worse. Level 4 ("Warning no Longer in
/// Force") and anything above it derive to 0.
pub fn risk_from_severity(severity_level: u8) -> u8 {
    4u8.saturating_sub(severity_level)
}

// ---------------------------------------------------------------------------
// Area and warning records
// ---------------------------------------------------------------------------

/// A monitored flood area. Identity is the `notation` code, which is the
/// key of every table in the service and is stable for the life of a
/// polling session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloodArea {
    /// Stable area code, e.g. `"012FWFAL"`.
    pub notation: String,
    /// Display label, e.g. `"River Foo at Falton"`.
    pub label: String,
    /// Free-text description of the area.
    pub description: String,
}

/// One active flood warning currently attached to an area.
///
/// Timestamps are carried as the upstream ISO 8601 strings; the service
/// never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningOverlay {
    pub message: String,
    /// Severity category label as reported upstream.
    pub severity: String,
    /// Severity level, 1 = most severe.
    pub severity_level: u8,
    pub time_raised: String,
    pub time_message_changed: String,
    pub time_severity_changed: String,
    pub tidal_alert: bool,
}

/// The externally visible per-area record: identity fields plus the current
/// warning overlays and the derived risk level.
///
/// Recomputed in full every cycle. An area with no active warning has an
/// empty overlay list and `risk_level == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRecord {
    /// Area code (the table key, repeated here for hosts that flatten records).
    pub name: String,
    /// Display label.
    pub friendly_name: String,
    pub description: String,
    /// Active warnings overlaid on this area in the current cycle.
    pub current_warnings: Vec<WarningOverlay>,
    /// 0 = no active warning; otherwise `4 - severity_level` of the worst
    /// active warning.
    pub risk_level: u8,
}

/// The merged table published to subscribers, keyed by area code.
/// BTreeMap keeps iteration order deterministic for display and tests.
pub type AreaTable = BTreeMap<String, AreaRecord>;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Transport-level failures from the fetch layer: connect errors, timeouts,
/// non-2xx statuses and malformed bodies. Never retried within a cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS or protocol failure from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {0}")]
    Status(reqwest::StatusCode),

    /// The body was not the expected JSON shape (including missing
    /// required fields).
    #[error("malformed API response: {0}")]
    Parse(String),
}

/// Outcome of a failed update cycle.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// One of the resource fetches failed.
    #[error("error communicating with API: {0}")]
    Fetch(#[from] FetchError),

    /// The whole cycle (both fetches plus merge) exceeded its budget.
    #[error("update cycle exceeded the {0:?} timeout")]
    Timeout(Duration),

    /// The first cycle failed, so the coordinator never became ready.
    /// Distinct from a later in-flight failure so the owner can defer
    /// registration and retry setup.
    #[error("first refresh failed; coordinator is not ready: {0}")]
    NotReady(#[source] Box<UpdateError>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
