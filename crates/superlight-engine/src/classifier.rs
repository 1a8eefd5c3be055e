//! Loopback classification of notification causes
//!
//! Given the traced cause of a device state change, decide whether it is an
//! echo of this engine's own write, a genuine external intervention, or
//! noise from some unrelated service. This is the piece that keeps the
//! engine's writes from re-entering the store as fake external claims while
//! still catching a person using a separate switch or app.

use superlight_core::{LIGHT_DOMAIN, SERVICE_TURN_OFF, SERVICE_TURN_ON};

use crate::Cause;

/// How a notification's cause relates to this engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseClass {
    /// Echo of this engine's own turn-on/turn-off; mirror, never re-arbitrate
    SelfEcho,
    /// Someone or something else changed the light; record it as manual
    External,
    /// Caused by an unrelated domain/service; drop it entirely
    Unrelated,
}

/// Classify a notification cause against this engine's origin id
///
/// Rules, matching the decision procedure:
/// - a light-domain turn_on/turn_off whose originator is `origin_id` is a
///   self-echo
/// - any other light-domain service call, a bare state change, or an
///   untraceable cause (None) is external
/// - a service call outside the light domain is unrelated
pub fn classify(origin_id: &str, cause: Option<&Cause>) -> CauseClass {
    match cause {
        Some(Cause::ServiceCall {
            domain,
            service,
            originator,
        }) if domain == LIGHT_DOMAIN => {
            let is_switching = service == SERVICE_TURN_ON || service == SERVICE_TURN_OFF;
            if is_switching && originator.as_deref() == Some(origin_id) {
                CauseClass::SelfEcho
            } else {
                CauseClass::External
            }
        }
        Some(Cause::ServiceCall { .. }) => CauseClass::Unrelated,
        Some(Cause::StateChanged) | None => CauseClass::External,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const US: &str = "engine-origin";

    #[test]
    fn test_own_turn_on_is_self_echo() {
        let cause = Cause::service_call("light", "turn_on", Some(US.into()));
        assert_eq!(classify(US, Some(&cause)), CauseClass::SelfEcho);
    }

    #[test]
    fn test_own_turn_off_is_self_echo() {
        let cause = Cause::service_call("light", "turn_off", Some(US.into()));
        assert_eq!(classify(US, Some(&cause)), CauseClass::SelfEcho);
    }

    #[test]
    fn test_foreign_light_command_is_external() {
        let cause = Cause::service_call("light", "turn_on", Some("someone-else".into()));
        assert_eq!(classify(US, Some(&cause)), CauseClass::External);
    }

    #[test]
    fn test_anonymous_light_command_is_external() {
        let cause = Cause::service_call("light", "turn_off", None);
        assert_eq!(classify(US, Some(&cause)), CauseClass::External);
    }

    #[test]
    fn test_other_light_service_is_external() {
        // toggle is not something this engine ever issues
        let cause = Cause::service_call("light", "toggle", Some(US.into()));
        assert_eq!(classify(US, Some(&cause)), CauseClass::External);
    }

    #[test]
    fn test_bare_state_change_is_external() {
        assert_eq!(
            classify(US, Some(&Cause::StateChanged)),
            CauseClass::External
        );
    }

    #[test]
    fn test_untraceable_cause_is_external() {
        assert_eq!(classify(US, None), CauseClass::External);
    }

    #[test]
    fn test_foreign_domain_is_unrelated() {
        let cause = Cause::service_call("scene", "turn_on", Some(US.into()));
        assert_eq!(classify(US, Some(&cause)), CauseClass::Unrelated);
    }
}
