/// floodwarn_service: Environment Agency (UK) flood warning monitoring service.
///
/// # Module structure
///
/// ```text
/// floodwarn_service
/// ├── model       — shared data types (FloodArea, WarningOverlay, AreaRecord, FetchError, …)
/// ├── config      — session configuration loader (floodwarn.toml)
/// ├── areas       — keyed area table construction and warning overlay merge
/// ├── coordinator — polling cadence, single-flight refresh, snapshot cache,
/// │                 readiness state machine, subscriber notification
/// ├── entity      — per-area entity state derivation (on/off + attributes)
/// └── ingest
///     ├── ea      — EA flood-monitoring API: URL construction + JSON parsing + HTTP client
///     └── fixtures (test only) — representative API response payloads
/// ```

/// Public modules
pub mod areas;
pub mod config;
pub mod coordinator;
pub mod entity;
pub mod ingest;
pub mod model;
