//! Per-area entity state derivation.
//!
//! A [`FloodAreaEntity`] is the host-facing view of one flood area: a
//! binary on/off state derived from the area's risk level, a unique
//! identifier (the area code), and the full merged record as auxiliary
//! attributes. Entities hold a `watch::Receiver` onto the coordinator's
//! snapshot channel, so every read reflects the latest published cycle
//! without locking.

use crate::coordinator::Snapshot;
use crate::model::AreaRecord;
use tokio::sync::watch;

/// Host-facing view of one monitored flood area.
pub struct FloodAreaEntity {
    area_code: String,
    receiver: watch::Receiver<Snapshot>,
}

impl FloodAreaEntity {
    pub fn new(area_code: impl Into<String>, receiver: watch::Receiver<Snapshot>) -> Self {
        Self { area_code: area_code.into(), receiver }
    }

    /// Stable unique identifier: the area code.
    pub fn unique_id(&self) -> &str {
        &self.area_code
    }

    /// `"on"` iff the area currently has a positive risk level.
    ///
    /// Area membership is stable within a session, so a missing record
    /// only occurs before the first successful cycle; it reads as `"off"`.
    pub fn state(&self) -> &'static str {
        let active = self
            .receiver
            .borrow()
            .get(&self.area_code)
            .map(|record| record.risk_level > 0)
            .unwrap_or(false);
        if active { "on" } else { "off" }
    }

    /// The area's display label from the latest snapshot.
    pub fn friendly_name(&self) -> Option<String> {
        self.receiver.borrow().get(&self.area_code).map(|record| record.friendly_name.clone())
    }

    /// Full merged record for the area, as auxiliary attributes.
    pub fn attributes(&self) -> Option<AreaRecord> {
        self.receiver.borrow().get(&self.area_code).cloned()
    }
}

/// Builds one entity per area in the receiver's current snapshot.
///
/// Call after the coordinator's first refresh has succeeded, so the
/// snapshot carries the session's full area membership.
pub fn entities_for(receiver: &watch::Receiver<Snapshot>) -> Vec<FloodAreaEntity> {
    let snapshot = receiver.borrow().clone();
    snapshot
        .keys()
        .map(|code| FloodAreaEntity::new(code.clone(), receiver.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
