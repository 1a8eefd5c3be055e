//! Context type for tracking command origin and causality

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Context for tracking the origin and causality of downstream commands
///
/// Every command the engine sends downstream carries a Context whose
/// `parent_id` is the engine's own origin id. Notifications caused by that
/// command echo the same id back in their cause chain, which is how the
/// loopback classifier tells the engine's own writes apart from external
/// interventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Unique identifier for this context (ULID)
    pub id: String,

    /// Parent context ID for tracking causality chains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Context {
    /// Create a new context with a fresh ULID
    pub fn new() -> Self {
        Self {
            id: Ulid::new().to_string(),
            parent_id: None,
        }
    }

    /// Create a context marked as originating from the given engine
    ///
    /// The origin id is echoed back through notification causes and is the
    /// correlation key for self-echo detection.
    pub fn originating_from(origin_id: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            parent_id: Some(origin_id.into()),
        }
    }

    /// Whether this context was originated by the given engine identity
    pub fn originated_by(&self, origin_id: &str) -> bool {
        self.parent_id.as_deref() == Some(origin_id)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
