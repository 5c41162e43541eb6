//! Tests for the ReAct loop of a single agent: phases, turn budget, tool errors as
//! observations, and handoff detection.
//!
//! Agents are built through a `Team` so handoffs are resolved; the loop is then driven
//! directly with a `MockLlm`.


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use baton::prompt::HANDOFF_PROMPT_PREFIX;
use baton::tools::{FnTool, ParamType, ParameterSchema};
use baton::{
    Agent, AssistantTurn, Conversation, LoopOutcome, Message, MockLlm, Phase, ReactLoop, Role,
    RunError, Team, ToolCall,
};
use serde_json::json;

fn add_tool() -> Arc<FnTool> {
    Arc::new(FnTool::new(
        "add",
        "Add two integers",
        ParameterSchema::new()
            .required("a", ParamType::Integer, "first addend")
            .required("b", ParamType::Integer, "second addend"),
        |args| {
            let a = args["a"].as_i64().unwrap_or_default();
            let b = args["b"].as_i64().unwrap_or_default();
            Ok((a + b).to_string())
        },
    ))
}

fn math_team() -> Team {
    Team::builder(Arc::new(MockLlm::new(Vec::new())))
        .agent(
            Agent::new("Triage")
                .instructions("Route requests.")
                .handoffs(["Math"]),
        )
        .agent(
            Agent::new("Math")
                .instructions("Do arithmetic.")
                .handoff_description("Solves arithmetic.")
                .tool(add_tool()),
        )
        .build()
        .unwrap()
}

fn conversation(text: &str) -> Conversation {
    Conversation::from_messages(vec![Message::user(text)])
}

/// **Scenario**: a final answer on the first call ends the loop without touching the log.
#[tokio::test]
async fn final_answer_ends_loop() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    let llm = MockLlm::new([AssistantTurn::final_text("hello")]);
    let mut conv = conversation("hi");

    let mut react = ReactLoop::new(team.agents(), math, &llm, 10, true);
    let outcome = react.run(&mut conv).await.unwrap();

    assert_eq!(outcome, LoopOutcome::Answer("hello".into()));
    assert_eq!(react.phase(), Phase::Done);
    assert_eq!(react.iterations(), 0);
    assert_eq!(conv.len(), 1);

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages[0], Message::system("Do arithmetic."));
    assert_eq!(requests[0].messages[1], Message::user("hi"));
    assert_eq!(requests[0].tool_names(), vec!["add"]);
}

/// **Scenario**: a model that never answers fails after exactly N tool-call cycles.
#[tokio::test]
async fn turn_limit_fails_after_exactly_n_cycles() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    for n in 1..=5u32 {
        let llm = MockLlm::repeating(AssistantTurn::tool_call("add", json!({"a": 1, "b": 2})));
        let mut conv = conversation("loop forever");

        let mut react = ReactLoop::new(team.agents(), math, &llm, n, true);
        let err = react.run(&mut conv).await.unwrap_err();

        match err {
            RunError::TurnLimitExceeded { agent, max_turns } => {
                assert_eq!(agent, "Math");
                assert_eq!(max_turns, n);
            }
            other => panic!("expected TurnLimitExceeded, got {:?}", other),
        }
        assert_eq!(react.phase(), Phase::Failed);
        assert_eq!(react.iterations(), n);
        assert_eq!(llm.call_count(), n as usize);
        // user + n * (assistant tool call, tool result)
        assert_eq!(conv.len(), 1 + 2 * n as usize);
    }
}

/// **Scenario**: a missing required argument becomes an observation, then the model answers.
#[tokio::test]
async fn missing_argument_is_observed() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    let llm = MockLlm::new([
        AssistantTurn::ToolCall {
            content: "adding".into(),
            call: ToolCall::new("add", json!({"a": 2})).with_id("c1"),
        },
        AssistantTurn::final_text("I need both numbers."),
    ]);
    let mut conv = conversation("add 2");

    let mut react = ReactLoop::new(team.agents(), math, &llm, 10, true);
    let outcome = react.run(&mut conv).await.unwrap();
    assert_eq!(outcome, LoopOutcome::Answer("I need both numbers.".into()));

    let messages = conv.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, "adding");
    assert_eq!(messages[2].role, Role::Tool);
    assert_eq!(messages[2].tool_call_id.as_deref(), Some("c1"));
    assert!(
        messages[2].content.contains("missing required parameter 'b'"),
        "{}",
        messages[2].content
    );

    // The second request shows the observation to the model.
    let second = &llm.requests()[1];
    assert_eq!(second.messages.last(), Some(&messages[2]));
}

/// **Scenario**: an unknown tool name is observed and the loop continues up to the limit.
#[tokio::test]
async fn unknown_tool_continues_until_turn_limit() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    let llm = MockLlm::repeating(AssistantTurn::tool_call("mul", json!({"a": 2, "b": 3})));
    let mut conv = conversation("multiply");

    let mut react = ReactLoop::new(team.agents(), math, &llm, 3, true);
    let err = react.run(&mut conv).await.unwrap_err();
    assert!(matches!(err, RunError::TurnLimitExceeded { .. }));

    let observations: Vec<&Message> = conv
        .messages()
        .iter()
        .filter(|m| m.role == Role::Tool)
        .collect();
    assert_eq!(observations.len(), 3);
    for obs in observations {
        assert!(obs.content.contains("unknown tool 'mul'"), "{}", obs.content);
        assert!(obs.content.contains("add"), "{}", obs.content);
    }
}

/// **Scenario**: unknown tool once, then a valid call and an answer.
#[tokio::test]
async fn unknown_tool_then_recovery() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    let llm = MockLlm::new([
        AssistantTurn::tool_call("mul", json!({})),
        AssistantTurn::tool_call("add", json!({"a": 2, "b": 3})),
        AssistantTurn::final_text("5"),
    ]);
    let mut conv = conversation("2+3");

    let mut react = ReactLoop::new(team.agents(), math, &llm, 10, true);
    assert_eq!(
        react.run(&mut conv).await.unwrap(),
        LoopOutcome::Answer("5".into())
    );
    assert_eq!(react.iterations(), 2);
    assert_eq!(conv.last().map(|m| m.content.as_str()), Some("5"));
    assert_eq!(conv.last().map(|m| m.role), Some(Role::Tool));
}

/// **Scenario**: a model error is fatal and not retried.
#[tokio::test]
async fn model_error_is_fatal() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    let llm = MockLlm::new([AssistantTurn::tool_call("add", json!({"a": 1, "b": 1}))])
        .then_error("provider down")
        .then(AssistantTurn::final_text("never reached"));
    let mut conv = conversation("1+1");

    let mut react = ReactLoop::new(team.agents(), math, &llm, 10, true);
    let err = react.run(&mut conv).await.unwrap_err();
    assert!(matches!(err, RunError::Model(_)));
    assert!(err.to_string().contains("provider down"));
    assert_eq!(react.phase(), Phase::Failed);
    assert_eq!(llm.call_count(), 2);
}

/// **Scenario**: a handoff call ends the loop with the exact target and never runs a tool.
#[tokio::test]
async fn handoff_call_signals_target_without_invoking_tools() {
    let probe_calls = Arc::new(AtomicUsize::new(0));
    let counter = probe_calls.clone();
    let probe = Arc::new(FnTool::new("probe", "Probe", ParameterSchema::new(), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok("probed".into())
    }));
    let team = Team::builder(Arc::new(MockLlm::new(Vec::new())))
        .agent(Agent::new("Triage").tool(probe).handoffs(["Math", "Weather"]))
        .agent(Agent::new("Math"))
        .agent(Agent::new("Weather"))
        .build()
        .unwrap();
    let triage = team.agent_id("Triage").unwrap();
    let llm = MockLlm::new([AssistantTurn::tool_call("switch_to_weather", json!({"note": "rain?"}))]);
    let mut conv = conversation("will it rain?");

    let mut react = ReactLoop::new(team.agents(), triage, &llm, 10, true);
    let outcome = react.run(&mut conv).await.unwrap();

    match outcome {
        LoopOutcome::Handoff(signal) => {
            assert_eq!(signal.target, team.agent_id("Weather").unwrap());
            assert_eq!(signal.target_name, "Weather");
            let last = conv.last().unwrap();
            assert_eq!(last.role, Role::Assistant);
            let call = last.tool_call.as_ref().unwrap();
            assert_eq!(call.name, "switch_to_weather");
            assert_eq!(call.id.as_deref(), Some(signal.call_id.as_str()));
        }
        other => panic!("expected handoff, got {:?}", other),
    }
    assert_eq!(probe_calls.load(Ordering::SeqCst), 0);
    assert_eq!(react.iterations(), 1);
    assert_eq!(conv.len(), 2);
}

/// **Scenario**: the model sees its tools plus one handoff tool per peer, and the
/// multi-agent prefix when enabled.
#[tokio::test]
async fn request_lists_handoff_tools_and_prefix() {
    let team = math_team();
    let triage = team.agent_id("Triage").unwrap();

    let llm = MockLlm::new([AssistantTurn::final_text("ok")]);
    ReactLoop::new(team.agents(), triage, &llm, 10, true)
        .run(&mut conversation("hi"))
        .await
        .unwrap();
    let request = &llm.requests()[0];
    assert_eq!(request.tool_names(), vec!["switch_to_math"]);
    assert_eq!(
        request.tools[0].description,
        "Transfer the conversation to the Math agent. Solves arithmetic."
    );
    let system = &request.messages[0];
    assert_eq!(system.role, Role::System);
    assert!(system.content.starts_with(HANDOFF_PROMPT_PREFIX));
    assert!(system.content.ends_with("Route requests."));

    let llm = MockLlm::new([AssistantTurn::final_text("ok")]);
    ReactLoop::new(team.agents(), triage, &llm, 10, false)
        .run(&mut conversation("hi"))
        .await
        .unwrap();
    assert_eq!(llm.requests()[0].messages[0].content, "Route requests.");
}

/// **Scenario**: a panicking tool is reported as an observation, the loop goes on.
#[tokio::test]
async fn panicking_tool_becomes_observation() {
    let boom = Arc::new(FnTool::new("boom", "Explodes", ParameterSchema::new(), |_| {
        panic!("tool exploded")
    }));
    let team = Team::builder(Arc::new(MockLlm::new(Vec::new())))
        .agent(Agent::new("Solo").tool(boom))
        .build()
        .unwrap();
    let solo = team.agent_id("Solo").unwrap();
    let llm = MockLlm::new([
        AssistantTurn::tool_call("boom", json!({})),
        AssistantTurn::final_text("that failed"),
    ]);
    let mut conv = conversation("go");

    let outcome = ReactLoop::new(team.agents(), solo, &llm, 10, true)
        .run(&mut conv)
        .await
        .unwrap();
    assert_eq!(outcome, LoopOutcome::Answer("that failed".into()));
    let obs = &conv.messages()[2];
    assert_eq!(obs.role, Role::Tool);
    assert!(obs.content.contains("tool exploded"), "{}", obs.content);
}

/// **Scenario**: calls without an id get one, and the result links to it.
#[tokio::test]
async fn missing_call_id_is_assigned() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    let llm = MockLlm::new([
        AssistantTurn::tool_call("add", json!({"a": 2, "b": 3})),
        AssistantTurn::final_text("5"),
    ]);
    let mut conv = conversation("2+3");
    ReactLoop::new(team.agents(), math, &llm, 10, true)
        .run(&mut conv)
        .await
        .unwrap();

    let messages = conv.messages();
    let id = messages[1]
        .tool_call
        .as_ref()
        .and_then(|c| c.id.clone())
        .unwrap();
    assert!(!id.is_empty());
    assert_eq!(messages[2].tool_call_id.as_deref(), Some(id.as_str()));
    assert_eq!(messages[2].content, "5");
}

/// **Scenario**: a self-peer yields no handoff tool, so `switch_to_<self>` is observed as
/// an unknown tool on every turn until the budget runs out.
#[tokio::test]
async fn self_handoff_is_observed_as_unknown_tool() {
    let team = Team::builder(Arc::new(MockLlm::new(Vec::new())))
        .agent(Agent::new("A").handoffs(["A"]))
        .build()
        .unwrap();
    let a = team.agent_id("A").unwrap();
    let llm = MockLlm::repeating(AssistantTurn::tool_call("switch_to_a", json!({})));
    let mut conv = conversation("talk to yourself");

    let mut react = ReactLoop::new(team.agents(), a, &llm, 3, true);
    let err = react.run(&mut conv).await.unwrap_err();
    assert!(matches!(err, RunError::TurnLimitExceeded { max_turns: 3, .. }));

    let observations: Vec<&Message> = conv
        .messages()
        .iter()
        .filter(|m| m.role == Role::Tool)
        .collect();
    assert_eq!(observations.len(), 3);
    for obs in observations {
        assert!(obs.content.contains("unknown tool 'switch_to_a'"), "{}", obs.content);
    }
}

/// **Scenario**: running the same loop twice gives the second run a fresh turn budget.
#[tokio::test]
async fn rerun_starts_with_fresh_turn_budget() {
    let team = math_team();
    let math = team.agent_id("Math").unwrap();
    let llm = MockLlm::new([
        AssistantTurn::tool_call("add", json!({"a": 1, "b": 1})),
        AssistantTurn::final_text("2"),
        AssistantTurn::tool_call("add", json!({"a": 2, "b": 2})),
        AssistantTurn::final_text("4"),
    ]);

    let mut react = ReactLoop::new(team.agents(), math, &llm, 2, true);
    let mut first = conversation("1 + 1");
    assert_eq!(
        react.run(&mut first).await.unwrap(),
        LoopOutcome::Answer("2".into())
    );
    assert_eq!(react.iterations(), 1);

    let mut second = conversation("2 + 2");
    assert_eq!(
        react.run(&mut second).await.unwrap(),
        LoopOutcome::Answer("4".into())
    );
    assert_eq!(react.iterations(), 1);
    assert_eq!(llm.call_count(), 4);
}
