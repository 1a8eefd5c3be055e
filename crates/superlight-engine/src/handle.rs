//! The public surface of one superlight

use tokio::sync::{mpsc, oneshot, watch};

use superlight_core::{AttributeSet, EntityId, LightAttribute, LightState};
use superlight_store::{Request, RequestError, MANUAL_ID};

use crate::engine::EngineMsg;
use crate::{EngineError, Notification};

/// Handle to one light's arbitration actor
///
/// Cloneable; all clones talk to the same serialized inbox. Every mutating
/// call resolves only after the actor has finished the operation, including
/// the downstream write it triggered. A caller that stops awaiting leaves
/// the store already mutated; that is intentional.
#[derive(Clone)]
pub struct LightHandle {
    entity_id: EntityId,
    wrapped_id: EntityId,
    tx: mpsc::Sender<EngineMsg>,
    state: watch::Receiver<LightState>,
}

impl LightHandle {
    pub(crate) fn new(
        entity_id: EntityId,
        wrapped_id: EntityId,
        tx: mpsc::Sender<EngineMsg>,
        state: watch::Receiver<LightState>,
    ) -> Self {
        Self {
            entity_id,
            wrapped_id,
            tx,
            state,
        }
    }

    /// The superlight's own entity id
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// The underlying light this superlight wraps
    pub fn wrapped_id(&self) -> &EntityId {
        &self.wrapped_id
    }

    /// Record a requester's claim, re-arbitrate, apply
    ///
    /// Validation happens here, before the store is touched: the id must be
    /// non-empty and the request must either assert a state or unlatch.
    pub async fn push_state(
        &self,
        id: impl Into<String>,
        priority: i64,
        turn_on: Option<bool>,
        attributes: AttributeSet,
        unlatch: bool,
    ) -> Result<(), EngineError> {
        let request = Request::build(id.into(), priority, turn_on, attributes, unlatch)?;
        self.push(request).await
    }

    /// Push from a raw service payload
    ///
    /// The payload carries the reserved keys `id`, `priority`, `turn_on`
    /// and `unlatch` alongside recognized light attributes, the way the
    /// host's push_state service delivers it. Anything malformed or outside
    /// the attribute allow-list is rejected here, before the store is
    /// touched.
    pub async fn push_state_payload(
        &self,
        payload: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), EngineError> {
        let mut rest = payload.clone();
        let id = rest
            .remove("id")
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or(RequestError::MalformedField("id"))?;
        let priority = rest
            .remove("priority")
            .and_then(|v| v.as_i64())
            .ok_or(RequestError::MalformedField("priority"))?;
        let unlatch = match rest.remove("unlatch") {
            None => false,
            Some(v) => v.as_bool().ok_or(RequestError::MalformedField("unlatch"))?,
        };
        let turn_on = match rest.remove("turn_on") {
            None => None,
            Some(v) => Some(v.as_bool().ok_or(RequestError::MalformedField("turn_on"))?),
        };
        let attributes = AttributeSet::try_from_json(&rest)?;
        self.push_state(id, priority, turn_on, attributes, unlatch)
            .await
    }

    /// Drop a requester's claim, re-arbitrate, apply
    ///
    /// Popping an id that was never pushed is not an error.
    pub async fn pop_state(&self, id: impl Into<String>) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineMsg::Pop {
            id: id.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| EngineError::Closed)?
    }

    /// Human override: turn the light on with the given attributes
    ///
    /// Equivalent to pushing the reserved manual id at maximum priority.
    /// When both color_temp and color_temp_kelvin are present, color_temp is
    /// dropped so the device isn't handed two colliding temperatures.
    pub async fn turn_on(&self, mut attributes: AttributeSet) -> Result<(), EngineError> {
        if attributes.contains(LightAttribute::ColorTemp)
            && attributes.contains(LightAttribute::ColorTempKelvin)
        {
            attributes.remove(LightAttribute::ColorTemp);
        }
        self.push(Request::manual(true, attributes)).await
    }

    /// Human override: turn the light off
    pub async fn turn_off(&self) -> Result<(), EngineError> {
        self.push(Request::manual(false, AttributeSet::new())).await
    }

    /// Relinquish the human override; the light reverts to the next-highest
    /// surviving request or becomes unmanaged
    pub async fn manual_release(&self) -> Result<(), EngineError> {
        self.pop_state(MANUAL_ID).await
    }

    /// Snapshot of the active requests in arbitration order, for
    /// diagnostics and UI
    pub async fn current_states(&self) -> Result<Vec<Request>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineMsg::Snapshot { reply }).await?;
        rx.await.map_err(|_| EngineError::Closed)
    }

    /// The current observable effective state
    pub fn state(&self) -> LightState {
        self.state.borrow().clone()
    }

    /// Subscribe to effective-state updates
    pub fn watch_state(&self) -> watch::Receiver<LightState> {
        self.state.clone()
    }

    /// Feed a device notification into the actor
    pub async fn notify(&self, notification: Notification) -> Result<(), EngineError> {
        self.send(EngineMsg::Notify(notification)).await
    }

    async fn push(&self, request: Request) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineMsg::Push { request, reply }).await?;
        rx.await.map_err(|_| EngineError::Closed)?
    }

    async fn send(&self, msg: EngineMsg) -> Result<(), EngineError> {
        self.tx.send(msg).await.map_err(|_| EngineError::Closed)
    }
}
