//! Core types for superlight
//!
//! This crate provides the fundamental types used throughout the superlight
//! workspace: Context, EntityId, the recognized light attribute set, and
//! LightState.

mod attributes;
mod context;
mod entity_id;
mod state;

pub use attributes::{AttributeError, AttributeSet, LightAttribute};
pub use context::Context;
pub use entity_id::{EntityId, EntityIdError};
pub use state::LightState;

/// Domain of the entities this engine wraps and drives
pub const LIGHT_DOMAIN: &str = "light";

/// Service name for a downstream turn-on command
pub const SERVICE_TURN_ON: &str = "turn_on";

/// Service name for a downstream turn-off command
pub const SERVICE_TURN_OFF: &str = "turn_off";
