//! The downstream command seam
//!
//! The host implements [`CommandSink`] over whatever actually drives lights
//! (a service registry, a bridge, a test double). The engine only ever sends
//! turn-on/turn-off commands through it, tagged with its own causal context.

use async_trait::async_trait;
use superlight_core::{AttributeSet, Context, EntityId, SERVICE_TURN_OFF, SERVICE_TURN_ON};
use thiserror::Error;

/// A downstream command for the wrapped light
#[derive(Debug, Clone, PartialEq)]
pub enum LightCommand {
    /// Turn the light on with the given attributes
    TurnOn(AttributeSet),
    /// Turn the light off
    TurnOff,
}

impl LightCommand {
    /// The service name this command maps to on the wire
    pub fn service(&self) -> &'static str {
        match self {
            LightCommand::TurnOn(_) => SERVICE_TURN_ON,
            LightCommand::TurnOff => SERVICE_TURN_OFF,
        }
    }

    /// Whether this command turns the light on
    pub fn is_turn_on(&self) -> bool {
        matches!(self, LightCommand::TurnOn(_))
    }
}

/// Errors a command sink can report back to the engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("device {0} is unavailable")]
    Unavailable(String),

    #[error("timed out waiting for {0} to acknowledge")]
    Timeout(String),

    #[error("command failed: {0}")]
    Failed(String),
}

/// Sends commands to the wrapped device and waits for acknowledgment
///
/// `send_command` must not resolve until the downstream call is acknowledged;
/// the engine relies on that to serialize writes per light. The context's
/// `parent_id` carries the engine's origin id and must be echoed back in the
/// cause chain of any notification the command produces.
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn send_command(
        &self,
        target: &EntityId,
        command: LightCommand,
        context: Context,
    ) -> Result<(), SinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_service_names() {
        assert_eq!(LightCommand::TurnOn(AttributeSet::new()).service(), "turn_on");
        assert_eq!(LightCommand::TurnOff.service(), "turn_off");
        assert!(LightCommand::TurnOn(AttributeSet::new()).is_turn_on());
        assert!(!LightCommand::TurnOff.is_turn_on());
    }
}
