//! Arbitration: turning the store's contents into one decision

use serde::{Deserialize, Serialize};
use superlight_core::AttributeSet;

use crate::RequestStore;

/// The outcome of arbitration over a request store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Decision {
    /// No one drives the light; mirror whatever it does natively
    Unmanaged,

    /// Drive the light to the winning request's state
    Managed {
        turn_on: bool,
        attributes: AttributeSet,
    },
}

impl Decision {
    /// Whether the engine is asserting control
    pub fn is_managed(&self) -> bool {
        matches!(self, Decision::Managed { .. })
    }
}

/// Compute the authoritative decision for the current store contents
///
/// Pure function: an empty store or an unlatched winner yields `Unmanaged`;
/// otherwise the winner's state is authoritative. An unlatched winner has
/// `turn_on == None` by construction, so the two arms are exhaustive.
pub fn decide(store: &RequestStore) -> Decision {
    match store.winner() {
        None => Decision::Unmanaged,
        Some(winner) if winner.unlatch => Decision::Unmanaged,
        Some(winner) => Decision::Managed {
            turn_on: winner.turn_on.unwrap_or(false),
            attributes: winner.attributes.clone(),
        },
    }
}
