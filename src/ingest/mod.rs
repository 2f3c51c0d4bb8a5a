//! Ingestion layer for the EA flood-monitoring API.
//!
//! `ea` owns URL construction, JSON parsing and the production HTTP client.
//! The coordinator talks to the layer through the [`FloodSource`] trait so
//! tests can drive it with scripted sources instead of the network.

pub mod ea;
#[cfg(test)]
pub(crate) mod fixtures;

use crate::model::FetchError;
use async_trait::async_trait;
use ea::{AreaItem, WarningItem};

/// Trait for fetching the two flood-monitoring resources.
///
/// A fetch performs one network round trip and may suspend the calling
/// task; it never retries. Transport failures of any kind surface as
/// [`FetchError`].
#[async_trait]
pub trait FloodSource: Send + Sync {
    /// Fetch the flood areas resource (stable membership, fetched once
    /// per polling session).
    async fn fetch_areas(&self) -> Result<Vec<AreaItem>, FetchError>;

    /// Fetch the currently active flood warnings (fetched every cycle).
    async fn fetch_warnings(&self) -> Result<Vec<WarningItem>, FetchError>;
}
