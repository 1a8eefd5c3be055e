//! Shared test fixtures
//!
//! Provides a recording command sink and helpers for building the
//! notifications a real host would deliver.

use std::sync::Mutex;

use async_trait::async_trait;
use superlight_core::{AttributeSet, Context, EntityId, LIGHT_DOMAIN};
use superlight_engine::{Cause, CommandSink, LightCommand, Notification, SinkError};

/// One command the engine sent downstream, with its causal context
#[derive(Debug, Clone)]
pub struct SentCommand {
    pub target: EntityId,
    pub command: LightCommand,
    pub context: Context,
}

impl SentCommand {
    /// The notification a host would deliver after applying this command
    pub fn echo(&self) -> Notification {
        let (reported_on, attributes) = match &self.command {
            LightCommand::TurnOn(attrs) => (true, attrs.clone()),
            LightCommand::TurnOff => (false, AttributeSet::new()),
        };
        Notification::report(self.target.clone(), reported_on, attributes).with_cause(
            Cause::service_call(
                LIGHT_DOMAIN,
                self.command.service(),
                self.context.parent_id.clone(),
            ),
        )
    }
}

/// A command sink that records everything and can be told to fail
#[derive(Default)]
pub struct MockSink {
    commands: Mutex<Vec<SentCommand>>,
    fail_with: Mutex<Option<SinkError>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands sent so far, oldest first
    pub fn commands(&self) -> Vec<SentCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// The most recent command
    pub fn last(&self) -> Option<SentCommand> {
        self.commands.lock().unwrap().last().cloned()
    }

    /// Number of commands sent
    pub fn sent(&self) -> usize {
        self.commands.lock().unwrap().len()
    }

    /// Make every subsequent send fail with the given error
    pub fn fail_with(&self, error: SinkError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    /// Stop failing
    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    /// The service names of all sent commands, for terse assertions
    pub fn services(&self) -> Vec<&'static str> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.command.service())
            .collect()
    }
}

#[async_trait]
impl CommandSink for MockSink {
    async fn send_command(
        &self,
        target: &EntityId,
        command: LightCommand,
        context: Context,
    ) -> Result<(), SinkError> {
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(error);
        }
        self.commands.lock().unwrap().push(SentCommand {
            target: target.clone(),
            command,
            context,
        });
        Ok(())
    }
}
