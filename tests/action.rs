// Action adapter ordering: activation must settle before dispatch starts, and
// failures propagate untouched.
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use cmdcontrib::{
    ActionPhase, ActivationService, CommandAction, CommandService, Decoded, decode,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
struct Journal {
    events: Mutex<Vec<String>>,
}

impl Journal {
    async fn push(&self, entry: String) {
        self.events.lock().await.push(entry);
    }

    async fn entries(&self) -> Vec<String> {
        self.events.lock().await.clone()
    }
}

struct SlowActivation {
    journal: Arc<Journal>,
    fail: bool,
}

#[async_trait]
impl ActivationService for SlowActivation {
    async fn activate_by_event(&self, event: &str) -> Result<()> {
        self.journal.push(format!("activate-start {event}")).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.fail {
            return Err(anyhow!("extension failed to activate"));
        }
        self.journal.push(format!("activate-done {event}")).await;
        Ok(())
    }
}

struct RecordingDispatch {
    journal: Arc<Journal>,
    fail: bool,
}

#[async_trait]
impl CommandService for RecordingDispatch {
    async fn execute_command(&self, command: &str, args: Vec<Value>) -> Result<Value> {
        self.journal
            .push(format!("dispatch {command} {}", Value::Array(args.clone())))
            .await;
        if self.fail {
            return Err(anyhow!("command handler crashed"));
        }
        // a leading integer argument is treated as handler latency in ms
        let latency = args.first().and_then(Value::as_u64).unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(latency)).await;
        Ok(json!({"ran": command, "argc": args.len()}))
    }
}

fn action(journal: &Arc<Journal>, activation_fails: bool, dispatch_fails: bool) -> CommandAction {
    let Decoded::Valid(command) = decode(&json!({"command": "acme.run", "title": "Run Task"})) else {
        panic!("fixture declaration should be valid");
    };
    CommandAction::new(
        &command,
        Arc::new(SlowActivation {
            journal: journal.clone(),
            fail: activation_fails,
        }),
        Arc::new(RecordingDispatch {
            journal: journal.clone(),
            fail: dispatch_fails,
        }),
    )
}

#[tokio::test]
async fn activation_completes_before_dispatch() -> Result<()> {
    let journal = Arc::new(Journal::default());
    let action = action(&journal, false, false);
    assert_eq!(action.id(), "acme.run");
    assert_eq!(action.label(), "Run Task");

    let (status, invocation) = action.invoke(vec![json!(1), json!("two")]);
    assert_eq!(status.phase(), ActionPhase::Pending);
    let result = invocation.await?;
    assert_eq!(result, json!({"ran": "acme.run", "argc": 2}));
    assert_eq!(
        journal.entries().await,
        [
            "activate-start onCommand:acme.run",
            "activate-done onCommand:acme.run",
            "dispatch acme.run [1,\"two\"]",
        ]
    );
    assert_eq!(status.phase(), ActionPhase::Done);
    Ok(())
}

#[tokio::test]
async fn activation_failure_skips_dispatch() {
    let journal = Arc::new(Journal::default());
    let action = action(&journal, true, false);
    let (status, invocation) = action.invoke(Vec::new());
    let err = invocation.await.unwrap_err();
    assert_eq!(err.to_string(), "extension failed to activate");
    assert_eq!(journal.entries().await, ["activate-start onCommand:acme.run"]);
    assert_eq!(status.phase(), ActionPhase::Failed);
}

#[tokio::test]
async fn dispatch_failure_propagates_as_is() {
    let journal = Arc::new(Journal::default());
    let action = action(&journal, false, true);
    let (status, invocation) = action.invoke(vec![json!(null)]);
    let err = invocation.await.unwrap_err();
    assert_eq!(err.to_string(), "command handler crashed");
    assert_eq!(journal.entries().await.len(), 3);
    assert_eq!(status.phase(), ActionPhase::Failed);
}

#[tokio::test]
async fn concurrent_invocations_track_their_own_phase() -> Result<()> {
    let journal = Arc::new(Journal::default());
    let action = Arc::new(action(&journal, false, false));

    let (fast_status, fast) = action.invoke(vec![json!(5)]);
    let (slow_status, slow) = action.invoke(vec![json!(300)]);
    let observer = async {
        while fast_status.phase() != ActionPhase::Done {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        slow_status.phase()
    };

    let (fast_result, slow_result, slow_phase_seen) = tokio::join!(fast, slow, observer);
    assert_eq!(fast_result?, json!({"ran": "acme.run", "argc": 1}));
    assert_eq!(slow_phase_seen, ActionPhase::Dispatching);
    assert_eq!(slow_result?, json!({"ran": "acme.run", "argc": 1}));
    assert_eq!(fast_status.phase(), ActionPhase::Done);
    assert_eq!(slow_status.phase(), ActionPhase::Done);
    Ok(())
}

#[tokio::test]
async fn plain_run_still_activates_then_dispatches() -> Result<()> {
    let journal = Arc::new(Journal::default());
    let action = action(&journal, false, false);
    action.run(Vec::new()).await?;
    assert_eq!(
        journal.entries().await,
        [
            "activate-start onCommand:acme.run",
            "activate-done onCommand:acme.run",
            "dispatch acme.run []",
        ]
    );
    Ok(())
}
