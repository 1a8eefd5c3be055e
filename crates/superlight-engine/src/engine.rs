//! The per-light actor
//!
//! One engine task per wrapped light owns that light's request store and is
//! its single writer. Operations arrive over an mpsc inbox and drain one at
//! a time, so a push can never interleave with a notification and two
//! downstream writes for one light can never overlap. The awaited sink call
//! is a suspension point only for this light; other lights run their own
//! actors.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument, trace, warn};

use superlight_core::{Context, EntityId, LightState};
use superlight_store::{decide, Decision, Request, RequestStore};

use crate::classifier::{classify, CauseClass};
use crate::{CommandSink, EngineError, LightCommand, LightHandle, Notification};

/// Inbox depth per light; pushes beyond this apply backpressure
const INBOX_CAPACITY: usize = 64;

/// Messages the actor drains serially
pub(crate) enum EngineMsg {
    Push {
        request: Request,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    Pop {
        id: String,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Vec<Request>>,
    },
    Notify(Notification),
}

/// The arbitration actor for one wrapped light
pub(crate) struct LightEngine {
    /// The superlight's own entity id
    entity_id: EntityId,
    /// The underlying light this engine drives
    wrapped_id: EntityId,
    /// Causal marker stamped on every downstream command
    origin_id: String,
    sink: Arc<dyn CommandSink>,
    store: RequestStore,
    state_tx: watch::Sender<LightState>,
    inbox: mpsc::Receiver<EngineMsg>,
}

impl LightEngine {
    /// Spawn the actor task and return the handle to talk to it
    pub(crate) fn spawn(
        entity_id: EntityId,
        wrapped_id: EntityId,
        origin_id: String,
        sink: Arc<dyn CommandSink>,
    ) -> LightHandle {
        let (tx, inbox) = mpsc::channel(INBOX_CAPACITY);
        let (state_tx, state_rx) = watch::channel(LightState::unknown());

        let engine = LightEngine {
            entity_id: entity_id.clone(),
            wrapped_id: wrapped_id.clone(),
            origin_id,
            sink,
            store: RequestStore::new(),
            state_tx,
            inbox,
        };
        tokio::spawn(engine.run());

        LightHandle::new(entity_id, wrapped_id, tx, state_rx)
    }

    async fn run(mut self) {
        debug!(entity_id = %self.entity_id, wrapped = %self.wrapped_id, "Light engine started");
        while let Some(msg) = self.inbox.recv().await {
            self.handle(msg).await;
        }
        debug!(entity_id = %self.entity_id, "Light engine stopped");
    }

    async fn handle(&mut self, msg: EngineMsg) {
        match msg {
            EngineMsg::Push { request, reply } => {
                let result = self.push(request).await;
                let _ = reply.send(result);
            }
            EngineMsg::Pop { id, reply } => {
                let result = self.pop(&id).await;
                let _ = reply.send(result);
            }
            EngineMsg::Snapshot { reply } => {
                let _ = reply.send(self.store.snapshot());
            }
            EngineMsg::Notify(notification) => self.on_notification(notification).await,
        }
    }

    /// Record a request, re-arbitrate, apply
    ///
    /// A sink failure is returned to the caller but the store keeps the
    /// request; the next operation re-attempts the same write.
    #[instrument(skip(self, request), fields(entity_id = %self.entity_id, id = %request.id))]
    async fn push(&mut self, request: Request) -> Result<(), EngineError> {
        debug!(priority = request.priority, unlatch = request.unlatch, "Push request");
        self.store.put(request);
        self.apply().await
    }

    /// Drop a request if present, re-arbitrate, apply
    #[instrument(skip(self), fields(entity_id = %self.entity_id))]
    async fn pop(&mut self, id: &str) -> Result<(), EngineError> {
        let found = self.store.remove(id);
        debug!(id = %id, found, "Pop request");
        self.apply().await
    }

    /// Dispatch the current arbitration decision downstream
    ///
    /// Unmanaged performs no write. Managed issues turn-on/turn-off tagged
    /// with this engine's origin and waits for acknowledgment. Applying the
    /// same decision twice issues the same command twice; there is no
    /// suppression of repeated identical writes.
    async fn apply(&mut self) -> Result<(), EngineError> {
        match decide(&self.store) {
            Decision::Unmanaged => {
                trace!(entity_id = %self.entity_id, "Unmanaged, no downstream write");
                Ok(())
            }
            Decision::Managed {
                turn_on,
                attributes,
            } => {
                let command = if turn_on {
                    LightCommand::TurnOn(attributes)
                } else {
                    LightCommand::TurnOff
                };
                trace!(
                    entity_id = %self.entity_id,
                    service = command.service(),
                    "Dispatching downstream command"
                );
                let context = Context::originating_from(&self.origin_id);
                self.sink
                    .send_command(&self.wrapped_id, command, context)
                    .await?;
                Ok(())
            }
        }
    }

    /// The loopback decision procedure, steps in order
    #[instrument(skip(self, notification), fields(entity_id = %self.entity_id))]
    async fn on_notification(&mut self, notification: Notification) {
        if notification.target != self.wrapped_id {
            trace!(target = %notification.target, "Notification for another entity, dropping");
            return;
        }

        // 1. Device gone: mark ourselves unavailable, leave the store alone
        if !notification.available {
            debug!("Wrapped device unavailable");
            let next = self.state_tx.borrow().into_unavailable();
            self.state_tx.send_replace(next);
            return;
        }

        // 2. Nothing managed: mirror whatever the device does
        if !decide(&self.store).is_managed() {
            trace!("No managed winner, mirroring device state");
            self.mirror(&notification);
            return;
        }

        match classify(&self.origin_id, notification.cause.as_ref()) {
            // 3. Our own write coming back: reflect what was actually
            // achieved, no store mutation, no re-arbitration
            CauseClass::SelfEcho => {
                trace!("Self-echo, mirroring without re-arbitration");
                self.mirror(&notification);
            }
            // 4. Genuine external intervention: record it as the manual
            // claim and re-arbitrate
            CauseClass::External => {
                debug!(reported_on = notification.reported_on, "External intervention");
                self.state_tx.send_if_modified(|state| {
                    let was = state.available;
                    state.available = true;
                    !was
                });
                self.store.put(Request::manual(
                    notification.reported_on,
                    notification.attributes.clone(),
                ));
                // No caller to hand this to; the manual entry stays and the
                // next operation retries the write.
                if let Err(error) = self.apply().await {
                    warn!(%error, "Re-apply after external intervention failed");
                }
            }
            // 5. Unrelated service noise
            CauseClass::Unrelated => {
                trace!("Unrelated cause, ignoring notification");
            }
        }
    }

    /// Mirror a device report into the observable effective state
    fn mirror(&self, notification: &Notification) {
        let next = self
            .state_tx
            .borrow()
            .with_report(notification.reported_on, notification.attributes.clone());
        self.state_tx.send_replace(next);
    }
}
