//! Graph controller: alternates model turns and tool batches until the model
//! answers without requesting tools.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::conversation::{should_continue, Conversation};
use super::events::{RunEventEmitter, RunEventPayload, RunEventSink};
use super::invoker::ModelInvoker;
use super::limits::RunLimits;
use super::types::{ControllerState, RunId, RunOutput};
use crate::config::DEFAULT_MAX_ITERATIONS;
use crate::error::RoamError;
use crate::tools::ToolRegistry;
use crate::types::{AgentToolCall, AgentToolResult, AssistantMessage, ModelMessage, Usage};

/// Input to one controller run.
#[derive(Clone)]
pub struct RunRequest {
    pub run_id: RunId,
    pub conversation: Conversation,
    pub metadata: HashMap<String, String>,
    pub event_sink: Option<RunEventSink>,
}

impl RunRequest {
    /// `conversation` should already hold the system and user messages.
    pub fn new(conversation: Conversation) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            conversation,
            metadata: HashMap::new(),
            event_sink: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_event_sink(mut self, sink: RunEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }
}

/// Next state after an assistant turn.
pub fn transition(message: &AssistantMessage) -> ControllerState {
    match message {
        AssistantMessage::FinalAnswer { text } => ControllerState::Done(text.clone()),
        AssistantMessage::ToolRequest { calls, .. } => ControllerState::AwaitingTools(calls.clone()),
    }
}

/// Drives the model/tool loop for one request at a time.
///
/// Holds only shared, read-only collaborators; every run owns its own
/// conversation.
#[derive(Clone)]
pub struct GraphController {
    invoker: Arc<dyn ModelInvoker>,
    tools: Arc<ToolRegistry>,
    max_iterations: usize,
}

impl GraphController {
    pub fn new(invoker: Arc<dyn ModelInvoker>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            invoker,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Default round-trip bound; run metadata may override it per request.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    pub async fn run(&self, request: RunRequest) -> Result<RunOutput, RoamError> {
        let RunRequest {
            run_id,
            mut conversation,
            metadata,
            event_sink,
        } = request;
        let limits = RunLimits::from_metadata(&metadata, self.max_iterations);
        let emitter = RunEventEmitter::new(run_id, event_sink);
        emitter.emit(RunEventPayload::Started);
        info!(%run_id, max_iterations = limits.max_iterations, "run started");

        let fail = |err: RoamError| {
            warn!(%run_id, error = %err, "run failed");
            emitter.emit(RunEventPayload::Failed {
                error: err.to_string(),
            });
            err
        };

        let mut state = ControllerState::AwaitingModel;
        let mut usage = Usage::default();
        let mut rounds = 0usize;

        let final_text = loop {
            state = match state {
                ControllerState::AwaitingModel => {
                    let turn = self
                        .invoker
                        .invoke(&conversation, &self.tools)
                        .await
                        .map_err(&fail)?;
                    usage.merge(&turn.usage);
                    conversation
                        .append(turn.message.to_message())
                        .map_err(&fail)?;

                    let next = transition(&turn.message);
                    let requested = match &next {
                        ControllerState::AwaitingTools(calls) => calls.len(),
                        _ => 0,
                    };
                    debug_assert_eq!(should_continue(&conversation), requested > 0);
                    debug!(%run_id, round = rounds, tool_calls = requested, "model turn");
                    emitter.emit(RunEventPayload::ModelResponded {
                        round: rounds,
                        tool_calls: requested,
                        usage: turn.usage,
                    });
                    next
                }
                ControllerState::AwaitingTools(calls) => {
                    rounds += 1;
                    if rounds > limits.max_iterations {
                        return Err(fail(RoamError::MaxIterationsExceeded {
                            max_iterations: limits.max_iterations,
                        }));
                    }
                    for result in self.execute_tools(&calls, &emitter).await {
                        conversation
                            .append(ModelMessage::tool_result(
                                result.tool_call_id,
                                result.result,
                                result.is_error,
                            ))
                            .map_err(&fail)?;
                    }
                    ControllerState::AwaitingModel
                }
                ControllerState::Done(text) => break text,
            };
        };

        info!(%run_id, rounds, total_tokens = usage.total_tokens, "run completed");
        emitter.emit(RunEventPayload::Completed { rounds });
        Ok(RunOutput {
            run_id,
            final_text,
            messages: conversation.into_messages(),
            usage,
            rounds,
        })
    }

    /// Run every call of one turn concurrently; results come back in call order.
    async fn execute_tools(
        &self,
        calls: &[AgentToolCall],
        emitter: &RunEventEmitter,
    ) -> Vec<AgentToolResult> {
        for call in calls {
            emitter.emit(RunEventPayload::ToolCallStarted { call: call.clone() });
        }
        let results = join_all(calls.iter().map(|call| self.tools.execute(call))).await;
        for result in &results {
            emitter.emit(RunEventPayload::ToolResult {
                result: result.clone(),
            });
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_loop::invoker::ModelTurn;
    use crate::agent_loop::RunEvent;
    use crate::tools::travel::default_registry;
    use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments, ToolExecutionContext};
    use crate::types::Role;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Requests another flight price lookup on every turn.
    struct AlwaysCallsTools {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelInvoker for AlwaysCallsTools {
        async fn invoke(
            &self,
            _conversation: &Conversation,
            _tools: &ToolRegistry,
        ) -> Result<ModelTurn, RoamError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ModelTurn {
                message: AssistantMessage::from_parts(
                    "",
                    vec![AgentToolCall {
                        id: format!("call_{n}"),
                        name: "get_flight_price".into(),
                        arguments: json!({ "destination": "다낭" }),
                    }],
                ),
                usage: Usage::default(),
            })
        }
    }

    /// Plays back scripted turns.
    struct Scripted {
        turns: Mutex<Vec<AssistantMessage>>,
    }

    impl Scripted {
        fn new(mut turns: Vec<AssistantMessage>) -> Self {
            turns.reverse();
            Self {
                turns: Mutex::new(turns),
            }
        }
    }

    #[async_trait]
    impl ModelInvoker for Scripted {
        async fn invoke(
            &self,
            _conversation: &Conversation,
            _tools: &ToolRegistry,
        ) -> Result<ModelTurn, RoamError> {
            let message = self
                .turns
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| RoamError::ModelInvocation("script exhausted".into()))?;
            Ok(ModelTurn {
                message,
                usage: Usage {
                    input_tokens: 1,
                    output_tokens: 1,
                    total_tokens: 2,
                },
            })
        }
    }

    fn controller(invoker: impl ModelInvoker + 'static) -> GraphController {
        GraphController::new(Arc::new(invoker), Arc::new(default_registry().unwrap()))
    }

    fn call(id: &str, name: &str, arguments: serde_json::Value) -> AgentToolCall {
        AgentToolCall {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    #[test]
    fn transition_matches_variant() {
        assert_eq!(
            transition(&AssistantMessage::FinalAnswer { text: "[]".into() }),
            ControllerState::Done("[]".into())
        );
        let calls = vec![call("a", "search_destinations", json!({}))];
        assert_eq!(
            transition(&AssistantMessage::ToolRequest {
                text: String::new(),
                calls: calls.clone()
            }),
            ControllerState::AwaitingTools(calls)
        );
    }

    #[tokio::test]
    async fn terminates_when_model_never_stops() {
        let invoker = AlwaysCallsTools {
            calls: AtomicUsize::new(0),
        };
        let controller = controller(invoker).with_max_iterations(4);
        let err = controller
            .run(RunRequest::new(Conversation::seeded("s", "u")))
            .await
            .unwrap_err();
        assert!(matches!(err, RoamError::MaxIterationsExceeded { max_iterations: 4 }));
    }

    #[tokio::test]
    async fn metadata_overrides_round_bound() {
        let invoker = Arc::new(AlwaysCallsTools {
            calls: AtomicUsize::new(0),
        });
        let controller =
            GraphController::new(invoker.clone(), Arc::new(default_registry().unwrap()));
        let err = controller
            .run(
                RunRequest::new(Conversation::seeded("s", "u"))
                    .with_metadata("runner.max_iterations", "2"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RoamError::MaxIterationsExceeded { max_iterations: 2 }));
        // Two completed round trips plus the turn that tripped the guard.
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn tool_results_precede_next_turn_in_call_order() {
        let controller = controller(Scripted::new(vec![
            AssistantMessage::from_parts(
                "",
                vec![
                    call("c1", "get_flight_price", json!({ "destination": "발리" })),
                    call("c2", "teleport", json!({})),
                    call("c3", "check_seasonal_events", json!({ "destination": "발리", "month": 6 })),
                ],
            ),
            AssistantMessage::from_parts("[]", vec![]),
        ]));

        let output = controller
            .run(RunRequest::new(Conversation::seeded("s", "u")))
            .await
            .unwrap();

        assert_eq!(output.final_text, "[]");
        assert_eq!(output.rounds, 1);
        assert_eq!(output.usage.total_tokens, 4);

        let roles: Vec<Role> = output.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::Tool,
                Role::Tool,
                Role::Tool,
                Role::Assistant
            ]
        );
        let ids: Vec<&str> = output.messages[3..6]
            .iter()
            .filter_map(|m| m.tool_call_id())
            .collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn results_keep_call_order_when_tools_finish_out_of_order() {
        let finished: Arc<Mutex<Vec<String>>> = Arc::default();
        let log = finished.clone();
        let slow_lookup = AgentTool::new(
            "slow_lookup",
            "Answers after delay_ms",
            AgentToolParameters::object()
                .integer("delay_ms", "Delay in milliseconds", (Some(0), None), true)
                .build(),
            move |args: ToolArguments, ctx: ToolExecutionContext| {
                let log = log.clone();
                async move {
                    let delay = args.get_u64("delay_ms")?;
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    let id = ctx.tool_call_id.unwrap_or_default();
                    log.lock().unwrap().push(id.clone());
                    Ok(json!({ "id": id, "delay_ms": delay }))
                }
            },
        );
        let registry = ToolRegistry::new()
            .with_tools([Arc::new(slow_lookup) as Arc<dyn Tool>])
            .unwrap();
        let controller = GraphController::new(
            Arc::new(Scripted::new(vec![
                AssistantMessage::from_parts(
                    "",
                    vec![
                        call("c1", "slow_lookup", json!({ "delay_ms": 300 })),
                        call("c2", "slow_lookup", json!({ "delay_ms": 200 })),
                        call("c3", "slow_lookup", json!({ "delay_ms": 100 })),
                    ],
                ),
                AssistantMessage::from_parts("[]", vec![]),
            ])),
            Arc::new(registry),
        );

        let started = tokio::time::Instant::now();
        let output = controller
            .run(RunRequest::new(Conversation::seeded("s", "u")))
            .await
            .unwrap();

        // Concurrent: the round costs the slowest call, not the sum.
        assert!(started.elapsed() < Duration::from_millis(600));
        assert_eq!(*finished.lock().unwrap(), vec!["c3", "c2", "c1"]);
        let ids: Vec<&str> = output.messages[3..6]
            .iter()
            .filter_map(|m| m.tool_call_id())
            .collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[tokio::test]
    async fn model_failure_is_fatal_and_reported() {
        let events: Arc<Mutex<Vec<RunEvent>>> = Arc::default();
        let sink_events = events.clone();
        let controller = controller(Scripted::new(vec![]));

        let err = controller
            .run(
                RunRequest::new(Conversation::seeded("s", "u")).with_event_sink(Arc::new(
                    move |event: RunEvent| sink_events.lock().unwrap().push(event),
                )),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RoamError::ModelInvocation(_)));
        let events = events.lock().unwrap();
        assert_eq!(events.first().unwrap().payload, RunEventPayload::Started);
        assert!(matches!(
            events.last().unwrap().payload,
            RunEventPayload::Failed { .. }
        ));
        assert!(events.windows(2).all(|w| w[0].seq < w[1].seq));
    }
}
