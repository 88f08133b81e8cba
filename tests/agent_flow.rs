//! End-to-end loop behavior against a scripted model backend.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use netguardian::agent::{AgentRunner, MAX_TURNS};
use netguardian::core::error::AgentError;
use netguardian::fleet::InMemoryFleetControl;
use netguardian::fleet::mock::mock_snapshot;
use netguardian::providers::{ChatTurn, ModelBackend};
use netguardian::tools::ToolContext;

/// Replays canned replies in order (the last one repeats) and records the
/// turn list it was handed on every call.
struct ScriptedBackend {
    replies: Vec<String>,
    calls: AtomicUsize,
    seen_turns: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedBackend {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            calls: AtomicUsize::new(0),
            seen_turns: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_turns(&self) -> Vec<ChatTurn> {
        self.seen_turns
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(
        &self,
        _system_instruction: &str,
        turns: &[ChatTurn],
    ) -> Result<String, AgentError> {
        self.seen_turns.lock().unwrap().push(turns.to_vec());
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.replies[index.min(self.replies.len() - 1)].clone())
    }
}

struct FailingBackend {
    status: u16,
}

#[async_trait]
impl ModelBackend for FailingBackend {
    async fn generate(
        &self,
        _system_instruction: &str,
        _turns: &[ChatTurn],
    ) -> Result<String, AgentError> {
        Err(AgentError::Api {
            status: self.status,
            body: "upstream unhappy".to_string(),
        })
    }
}

#[tokio::test]
async fn single_tool_call_then_final_answer_uses_two_turns() {
    let snapshot = mock_snapshot();
    let control = InMemoryFleetControl::new(&snapshot);
    let context = ToolContext {
        snapshot: &snapshot,
        control: &control,
    };
    let backend = ScriptedBackend::new(&[
        r#"{"tool":"find_device","args":{"search_term":"core"}}"#,
        "The core router is Core-Cisco, currently online.",
    ]);
    let progress: Mutex<Vec<(String, String)>> = Mutex::new(Vec::new());

    let answer = AgentRunner::new()
        .run(&backend, &[], "which device is the core router?", &context, &|tool, args| {
            progress.lock().unwrap().push((tool.to_string(), args.to_string()));
        })
        .await
        .unwrap();

    assert_eq!(answer, "The core router is Core-Cisco, currently online.");
    assert_eq!(backend.call_count(), 2);

    let events = progress.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "find_device");
    assert!(events[0].1.contains("core"));

    // The tool result was appended before the second model call.
    let turns = backend.last_turns();
    assert!(turns.last().unwrap().text.starts_with("TOOL_OUTPUT: "));
    assert!(turns.last().unwrap().text.contains("core-01"));
}

#[tokio::test]
async fn envelope_on_every_turn_exhausts_the_budget() {
    let snapshot = mock_snapshot();
    let control = InMemoryFleetControl::new(&snapshot);
    let context = ToolContext {
        snapshot: &snapshot,
        control: &control,
    };
    let backend =
        ScriptedBackend::new(&[r#"{"tool":"find_device","args":{"search_term":"core"}}"#]);

    let answer = AgentRunner::new()
        .run(&backend, &[], "loop forever please", &context, &|_, _| {})
        .await
        .unwrap();

    assert_eq!(backend.call_count(), MAX_TURNS);
    assert_eq!(answer, "Stopped: the maximum number of agent turns was reached.");
}

#[tokio::test]
async fn reboot_scenario_records_exactly_one_audit_entry() {
    let snapshot = mock_snapshot();
    let control = InMemoryFleetControl::new(&snapshot);
    let context = ToolContext {
        snapshot: &snapshot,
        control: &control,
    };
    let backend = ScriptedBackend::new(&[
        r#"{"tool":"find_device","args":{"search_term":"core"}}"#,
        r#"{"tool":"reboot_device","args":{"device_id":"core-01"}}"#,
        "Done. Reboot signal sent to Core-Cisco.",
    ]);
    let progress: Mutex<Vec<String>> = Mutex::new(Vec::new());

    let answer = AgentRunner::new()
        .run(&backend, &[], "reboot the core switch", &context, &|tool, _| {
            progress.lock().unwrap().push(tool.to_string());
        })
        .await
        .unwrap();

    assert!(answer.contains("Reboot signal sent to Core-Cisco"));
    assert_eq!(backend.call_count(), 3);
    assert_eq!(
        *progress.lock().unwrap(),
        vec!["find_device".to_string(), "reboot_device".to_string()]
    );

    // Exactly one audited side effect: the reboot itself.
    assert_eq!(control.audit_log().len(), 1);
    assert_eq!(control.audit_log()[0].device_id, "core-01");
    assert_eq!(control.toggles(), vec!["core-01".to_string()]);

    let turns = backend.last_turns();
    assert!(
        turns
            .last()
            .unwrap()
            .text
            .starts_with("TOOL_OUTPUT: Reboot signal sent to Core-Cisco.")
    );
}

#[tokio::test]
async fn unknown_tool_is_fed_back_and_conversation_recovers() {
    let snapshot = mock_snapshot();
    let control = InMemoryFleetControl::new(&snapshot);
    let context = ToolContext {
        snapshot: &snapshot,
        control: &control,
    };
    let backend = ScriptedBackend::new(&[
        r#"{"tool":"open_ticket","args":{"title":"core down"}}"#,
        "I cannot open tickets; here is what I found instead.",
    ]);
    let progress: Mutex<usize> = Mutex::new(0);

    let answer = AgentRunner::new()
        .run(&backend, &[], "open a ticket for the core", &context, &|_, _| {
            *progress.lock().unwrap() += 1;
        })
        .await
        .unwrap();

    assert_eq!(answer, "I cannot open tickets; here is what I found instead.");
    // No dispatch happened, so no progress notification either.
    assert_eq!(*progress.lock().unwrap(), 0);

    let turns = backend.last_turns();
    assert_eq!(
        turns.last().unwrap().text,
        "TOOL_OUTPUT: Tool 'open_ticket' not found."
    );
}

#[tokio::test]
async fn malformed_arguments_turn_the_reply_into_a_final_answer() {
    let snapshot = mock_snapshot();
    let control = InMemoryFleetControl::new(&snapshot);
    let context = ToolContext {
        snapshot: &snapshot,
        control: &control,
    };
    let reply = r#"{"tool":"execute_cli_command","args":{"device_id":"core-01"}}"#;
    let backend = ScriptedBackend::new(&[reply]);

    let answer = AgentRunner::new()
        .run(&backend, &[], "run something", &context, &|_, _| {})
        .await
        .unwrap();

    assert_eq!(answer, reply);
    assert_eq!(backend.call_count(), 1);
    assert!(control.audit_log().is_empty());
}

#[tokio::test]
async fn transport_error_aborts_without_partial_dispatch() {
    let snapshot = mock_snapshot();
    let control = InMemoryFleetControl::new(&snapshot);
    let context = ToolContext {
        snapshot: &snapshot,
        control: &control,
    };
    let err = AgentRunner::new()
        .run(
            &FailingBackend { status: 500 },
            &[],
            "anything",
            &context,
            &|_, _| {},
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Api { status: 500, .. }));
    assert!(err.is_transport());
    assert!(control.audit_log().is_empty());
}

#[tokio::test]
async fn chinese_request_gets_the_localized_budget_advisory() {
    let snapshot = mock_snapshot();
    let control = InMemoryFleetControl::new(&snapshot);
    let context = ToolContext {
        snapshot: &snapshot,
        control: &control,
    };
    let backend =
        ScriptedBackend::new(&[r#"{"tool":"find_device","args":{"search_term":"核心"}}"#]);

    let answer = AgentRunner::new()
        .run(&backend, &[], "重启核心交换机", &context, &|_, _| {})
        .await
        .unwrap();

    assert_eq!(answer, "已停止：达到智能代理的最大执行轮数。");
}
