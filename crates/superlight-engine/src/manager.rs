//! Hosting many superlights over one command sink

use std::sync::Arc;

use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, info, warn};
use ulid::Ulid;

use superlight_core::EntityId;

use crate::engine::LightEngine;
use crate::{CommandSink, EngineError, LightHandle, Notification};

/// Per-light configuration, deserialized from the host's config-entry options
#[derive(Debug, Clone, Deserialize)]
pub struct LightOptions {
    /// The light entity to wrap (e.g., "light.kitchen")
    pub entity_id: String,

    /// Display name override
    #[serde(default)]
    pub name: Option<String>,

    /// Stable unique id; doubles as the engine's causal origin marker.
    /// Generated when absent.
    #[serde(default)]
    pub unique_id: Option<String>,
}

impl LightOptions {
    /// Options wrapping the given entity, everything else defaulted
    pub fn wrapping(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            name: None,
            unique_id: None,
        }
    }
}

/// Owns the set of running light engines
///
/// One actor per added light; no state is shared between them beyond the
/// command sink. Notifications are routed to the engine wrapping their
/// target entity.
pub struct Superlights {
    sink: Arc<dyn CommandSink>,
    /// Handles keyed by the superlight's own entity id
    lights: DashMap<String, LightHandle>,
    /// Wrapped entity id -> superlight entity id, for notification routing
    by_wrapped: DashMap<String, String>,
}

impl Superlights {
    /// Create a manager driving lights through the given sink
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self {
            sink,
            lights: DashMap::new(),
            by_wrapped: DashMap::new(),
        }
    }

    /// Spawn an engine wrapping the configured light
    ///
    /// The superlight's entity id is derived from the wrapped one
    /// ("light.kitchen" -> "light.kitchen_superlight").
    pub fn add_light(&self, options: LightOptions) -> Result<LightHandle, EngineError> {
        let wrapped: EntityId = options.entity_id.parse()?;
        if !wrapped.is_light() {
            return Err(EngineError::NotALight(wrapped.to_string()));
        }

        let entity_id = wrapped.superlight_id();
        let origin_id = options
            .unique_id
            .unwrap_or_else(|| Ulid::new().to_string());

        let handle = LightEngine::spawn(
            entity_id.clone(),
            wrapped.clone(),
            origin_id,
            self.sink.clone(),
        );

        info!(entity_id = %entity_id, wrapped = %wrapped, "Added superlight");
        self.by_wrapped
            .insert(wrapped.to_string(), entity_id.to_string());
        self.lights.insert(entity_id.to_string(), handle.clone());
        Ok(handle)
    }

    /// Get the handle for a superlight entity id
    pub fn handle(&self, entity_id: &str) -> Option<LightHandle> {
        self.lights.get(entity_id).map(|h| h.clone())
    }

    /// Get the handle of the superlight wrapping the given entity
    pub fn handle_for_wrapped(&self, wrapped_id: &str) -> Option<LightHandle> {
        let entity_id = self.by_wrapped.get(wrapped_id)?.clone();
        self.handle(&entity_id)
    }

    /// Route a device notification to the engine wrapping its target
    ///
    /// Returns false when no superlight wraps the target.
    pub async fn dispatch_notification(
        &self,
        notification: Notification,
    ) -> Result<bool, EngineError> {
        match self.handle_for_wrapped(&notification.target.to_string()) {
            Some(handle) => {
                handle.notify(notification).await?;
                Ok(true)
            }
            None => {
                warn!(target = %notification.target, "Notification for unmanaged entity");
                Ok(false)
            }
        }
    }

    /// Stop tracking a superlight; its actor winds down once the last
    /// handle clone is dropped
    pub fn remove_light(&self, entity_id: &str) -> bool {
        let removed = self.lights.remove(entity_id);
        if let Some((_, handle)) = &removed {
            self.by_wrapped.remove(&handle.wrapped_id().to_string());
            debug!(entity_id = %entity_id, "Removed superlight");
        }
        removed.is_some()
    }

    /// Number of managed lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether any lights are managed
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}
