//! Inbound notifications from the wrapped device

use serde::{Deserialize, Serialize};
use superlight_core::{AttributeSet, EntityId};

/// The traced cause of a device state change, when the host knows it
///
/// This is the explicit correlation chain the classifier works from. A
/// notification can also arrive with no cause at all (cloud bridges,
/// external apps); the classifier treats those as external.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cause {
    /// The change was produced by a service call
    ServiceCall {
        /// Domain the called service belongs to
        domain: String,
        /// Service name within that domain
        service: String,
        /// Origin id of the caller, if the context chain carried one
        #[serde(skip_serializing_if = "Option::is_none")]
        originator: Option<String>,
    },
    /// A bare state-change with no service call behind it
    StateChanged,
}

impl Cause {
    /// Convenience constructor for a service-call cause
    pub fn service_call(
        domain: impl Into<String>,
        service: impl Into<String>,
        originator: Option<String>,
    ) -> Self {
        Cause::ServiceCall {
            domain: domain.into(),
            service: service.into(),
            originator,
        }
    }
}

/// A state-change notification for one wrapped device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// The wrapped entity this notification describes
    pub target: EntityId,

    /// The on/off value the device reported
    pub reported_on: bool,

    /// Recognized attributes from the report
    #[serde(default)]
    pub attributes: AttributeSet,

    /// Whether the device is reachable
    pub available: bool,

    /// Traced cause of the change, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Cause>,
}

impl Notification {
    /// A report from an available device with no traced cause
    pub fn report(target: EntityId, reported_on: bool, attributes: AttributeSet) -> Self {
        Self {
            target,
            reported_on,
            attributes,
            available: true,
            cause: None,
        }
    }

    /// The device dropped off the network
    pub fn unavailable(target: EntityId) -> Self {
        Self {
            target,
            reported_on: false,
            attributes: AttributeSet::new(),
            available: false,
            cause: None,
        }
    }

    /// Attach a traced cause
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> EntityId {
        "light.kitchen".parse().unwrap()
    }

    #[test]
    fn test_report_defaults() {
        let n = Notification::report(target(), true, AttributeSet::new());
        assert!(n.available);
        assert!(n.cause.is_none());
        assert!(n.reported_on);
    }

    #[test]
    fn test_unavailable() {
        let n = Notification::unavailable(target());
        assert!(!n.available);
    }

    #[test]
    fn test_serde_roundtrip_with_cause() {
        let n = Notification::report(target(), false, AttributeSet::new())
            .with_cause(Cause::service_call("light", "turn_off", Some("abc".into())));

        let encoded = serde_json::to_string(&n).unwrap();
        let decoded: Notification = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, n);
    }
}
