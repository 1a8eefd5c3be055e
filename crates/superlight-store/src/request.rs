//! Request type: one requester's standing claim on the light

use serde::{Deserialize, Serialize};
use superlight_core::AttributeSet;
use thiserror::Error;

/// Priority used for direct human interaction; nothing outranks it
pub const MAX_PRIORITY: i64 = i64::MAX;

/// Reserved requester id for direct human interaction
pub const MANUAL_ID: &str = "manual";

/// Error type for malformed requests, raised before any store mutation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("requester id cannot be empty")]
    EmptyId,

    #[error("a request must either assert a state (turn_on) or unlatch")]
    MissingState,

    #[error("missing or malformed field: {0}")]
    MalformedField(&'static str),

    #[error("an unlatch request cannot assert a state")]
    UnlatchWithState,
}

/// One requester's desired light state
///
/// A request persists until its id is explicitly popped or replaced; a stale
/// request is a standing claim, not a leak. An unlatching request asserts no
/// state at all: it says "if I win, leave the light alone".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Unique requester id; pushing the same id again replaces the entry
    pub id: String,

    /// Higher wins; ties go to the most recent push
    pub priority: i64,

    /// Desired on/off value; None iff `unlatch`
    pub turn_on: Option<bool>,

    /// Recognized light attributes to apply when turning on
    #[serde(default)]
    pub attributes: AttributeSet,

    /// Whether this requester releases control instead of asserting a state
    #[serde(default)]
    pub unlatch: bool,
}

impl Request {
    /// Create a request that asserts a state
    pub fn new(
        id: impl Into<String>,
        priority: i64,
        turn_on: bool,
        attributes: AttributeSet,
    ) -> Result<Self, RequestError> {
        Self::build(id.into(), priority, Some(turn_on), attributes, false)
    }

    /// Create an unlatching request: if it wins, the light is unmanaged
    pub fn unlatch(id: impl Into<String>, priority: i64) -> Result<Self, RequestError> {
        Self::build(id.into(), priority, None, AttributeSet::new(), true)
    }

    /// Create the manual-override request a human turn-on/turn-off produces
    pub fn manual(turn_on: bool, attributes: AttributeSet) -> Self {
        Self {
            id: MANUAL_ID.to_string(),
            priority: MAX_PRIORITY,
            turn_on: Some(turn_on),
            attributes,
            unlatch: false,
        }
    }

    /// Validate and assemble a request from raw parts
    pub fn build(
        id: String,
        priority: i64,
        turn_on: Option<bool>,
        attributes: AttributeSet,
        unlatch: bool,
    ) -> Result<Self, RequestError> {
        if id.is_empty() {
            return Err(RequestError::EmptyId);
        }
        match (unlatch, turn_on) {
            (false, None) => return Err(RequestError::MissingState),
            (true, Some(_)) => return Err(RequestError::UnlatchWithState),
            _ => {}
        }
        Ok(Self {
            id,
            priority,
            turn_on,
            attributes,
            unlatch,
        })
    }

    /// Whether this is the reserved manual-override request
    pub fn is_manual(&self) -> bool {
        self.id == MANUAL_ID
    }
}
