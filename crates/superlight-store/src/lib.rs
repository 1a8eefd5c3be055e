//! Request store and priority arbiter for superlight
//!
//! This crate is the pure data layer of the engine: the set of active state
//! requests keyed by requester id, and the arbitration that picks the single
//! authoritative request out of it. Nothing here touches a device or an
//! event loop.

mod arbiter;
mod request;
mod store;

pub use arbiter::{decide, Decision};
pub use request::{Request, RequestError, MANUAL_ID, MAX_PRIORITY};
pub use store::RequestStore;
