//! LightState, the engine's observable effective state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AttributeSet;

/// The state a superlight reports to the outside world
///
/// Mirrors what the wrapped device last reported: on/off, the recognized
/// attributes it carried, and availability. Timestamps follow the host
/// convention: `last_changed` only moves when the on/off value actually
/// changes, `last_updated` on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightState {
    /// Whether the light is on, or None before the first report
    pub is_on: Option<bool>,

    /// Recognized attributes from the last device report
    #[serde(default)]
    pub attributes: AttributeSet,

    /// Whether the wrapped device is reachable
    pub available: bool,

    /// When the on/off value last changed
    pub last_changed: DateTime<Utc>,

    /// When the state was last written, even if the value didn't change
    pub last_updated: DateTime<Utc>,
}

impl LightState {
    /// Initial state: nothing reported yet, assumed unavailable
    pub fn unknown() -> Self {
        let now = Utc::now();
        Self {
            is_on: None,
            attributes: AttributeSet::new(),
            available: false,
            last_changed: now,
            last_updated: now,
        }
    }

    /// Absorb a device report, preserving `last_changed` when the on/off
    /// value is unchanged
    pub fn with_report(&self, is_on: bool, attributes: AttributeSet) -> Self {
        let now = Utc::now();
        let changed = self.is_on != Some(is_on);
        Self {
            is_on: Some(is_on),
            attributes,
            available: true,
            last_changed: if changed { now } else { self.last_changed },
            last_updated: now,
        }
    }

    /// Mark the state unavailable, keeping the last known values
    pub fn into_unavailable(&self) -> Self {
        Self {
            available: false,
            last_updated: Utc::now(),
            ..self.clone()
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::unknown()
    }
}
