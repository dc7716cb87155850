//! Invocable actions backed by cataloged command declarations.
//!
//! Running a [`CommandAction`] is a two-stage pipeline: activate the owning
//! extension for `onCommand:<id>`, then dispatch `<id>` with the caller's
//! arguments. Dispatch never starts before activation has completed, and an
//! activation failure ends the invocation.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::declaration::Command;

/// Loads and activates extensions in response to activation events.
#[async_trait]
pub trait ActivationService: Send + Sync {
    async fn activate_by_event(&self, event: &str) -> Result<()>;
}

/// Executes registered commands by id.
#[async_trait]
pub trait CommandService: Send + Sync {
    async fn execute_command(&self, command: &str, args: Vec<Value>) -> Result<Value>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionPhase {
    Pending,
    Activating,
    Dispatching,
    Done,
    Failed,
}

/// Progress of one invocation. Each call to [`CommandAction::invoke`] gets
/// its own status; invocations never observe each other.
#[derive(Clone, Debug)]
pub struct InvocationStatus(Arc<Mutex<ActionPhase>>);

impl InvocationStatus {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(ActionPhase::Pending)))
    }

    pub fn phase(&self) -> ActionPhase {
        match self.0.lock() {
            Ok(phase) => *phase,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn enter(&self, next: ActionPhase) {
        match self.0.lock() {
            Ok(mut phase) => *phase = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

pub struct CommandAction {
    command: Command,
    activation_event: String,
    activation: Arc<dyn ActivationService>,
    dispatcher: Arc<dyn CommandService>,
}

impl CommandAction {
    pub fn new(
        command: &Command,
        activation: Arc<dyn ActivationService>,
        dispatcher: Arc<dyn CommandService>,
    ) -> Self {
        Self {
            activation_event: command.activation_event(),
            command: command.clone(),
            activation,
            dispatcher,
        }
    }

    pub fn id(&self) -> &str {
        &self.command.command
    }

    pub fn label(&self) -> &str {
        &self.command.title
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Activate the owning extension, then dispatch the command.
    ///
    /// Errors from either service are returned as-is.
    pub async fn run(&self, args: Vec<Value>) -> Result<Value> {
        self.drive(args, &InvocationStatus::new()).await
    }

    /// Like [`CommandAction::run`], but also hands back a status handle the
    /// caller can poll while the returned future is in flight.
    pub fn invoke(
        &self,
        args: Vec<Value>,
    ) -> (InvocationStatus, impl Future<Output = Result<Value>> + Send + '_) {
        let status = InvocationStatus::new();
        let tracker = status.clone();
        (status, async move { self.drive(args, &tracker).await })
    }

    async fn drive(&self, args: Vec<Value>, status: &InvocationStatus) -> Result<Value> {
        status.enter(ActionPhase::Activating);
        tracing::debug!(event = %self.activation_event, "activating command owner");
        if let Err(err) = self.activation.activate_by_event(&self.activation_event).await {
            status.enter(ActionPhase::Failed);
            return Err(err);
        }

        status.enter(ActionPhase::Dispatching);
        tracing::debug!(command = %self.id(), args = args.len(), "dispatching command");
        match self.dispatcher.execute_command(self.id(), args).await {
            Ok(value) => {
                status.enter(ActionPhase::Done);
                Ok(value)
            }
            Err(err) => {
                status.enter(ActionPhase::Failed);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandAction")
            .field("id", &self.id())
            .field("label", &self.label())
            .finish_non_exhaustive()
    }
}
