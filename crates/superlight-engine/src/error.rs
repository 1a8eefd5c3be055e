//! Error taxonomy for engine operations

use superlight_core::{AttributeError, EntityIdError};
use superlight_store::RequestError;
use thiserror::Error;

use crate::SinkError;

/// Errors surfaced to callers of the public surface
///
/// Nothing here is fatal to the process; every failure is scoped to a single
/// light's operation. A sink failure leaves the store mutated on purpose:
/// the request stands and the next arbitration re-attempts the write.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("invalid attributes: {0}")]
    InvalidAttributes(#[from] AttributeError),

    #[error("invalid entity id: {0}")]
    InvalidEntityId(#[from] EntityIdError),

    #[error("{0} is not a light entity")]
    NotALight(String),

    #[error("downstream command failed: {0}")]
    Sink(#[from] SinkError),

    #[error("light engine is no longer running")]
    Closed,
}
