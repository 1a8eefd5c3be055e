//! Per-light arbitration engine
//!
//! This crate runs one actor per wrapped light. The actor owns that light's
//! request store, arbitrates on every mutation, drives the device through a
//! [`CommandSink`], and classifies inbound notifications so the engine's own
//! writes never loop back into the store as fake external requests.
//!
//! The host platform interacts through two seams:
//! - [`LightHandle`] / [`Superlights`] for push/pop/turn-on/turn-off and the
//!   observable effective state
//! - [`Notification`] delivery for device state changes

mod classifier;
mod engine;
mod error;
mod handle;
mod manager;
mod notification;
mod sink;

pub use classifier::{classify, CauseClass};
pub use error::EngineError;
pub use handle::LightHandle;
pub use manager::{LightOptions, Superlights};
pub use notification::{Cause, Notification};
pub use sink::{CommandSink, LightCommand, SinkError};
