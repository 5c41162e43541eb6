//! Example: a Triage agent hands arithmetic questions to a Math agent with an `add` tool.
//!
//! The model is a small rule-based client so the example runs offline: it hands off when
//! a handoff tool is offered, calls `add` for "a+b" input, and answers with the last
//! observation.
//!
//! Run: `RUST_LOG=baton=debug cargo run -p baton-examples --example triage -- "compute 2+3"`

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use baton::tools::{FnTool, ParamType, ParameterSchema, ToolSpec};
use baton::{Agent, AgentError, AssistantTurn, LlmClient, Message, Role, Team, TeamConfig};
use serde_json::json;

struct RuleLlm;

fn parse_sum(text: &str) -> Option<(i64, i64)> {
    let expr: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let start = expr.find(|c: char| c.is_ascii_digit())?;
    let (a, b) = expr[start..].split_once('+')?;
    let b: String = b.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((a.parse().ok()?, b.parse().ok()?))
}

#[async_trait]
impl LlmClient for RuleLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<AssistantTurn, AgentError> {
        let last = messages
            .last()
            .ok_or_else(|| AgentError::ExecutionFailed("empty request".into()))?;
        let question = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        if let Some(handoff) = tools.iter().find(|t| t.name.starts_with("switch_to_")) {
            return Ok(AssistantTurn::tool_call(
                handoff.name.clone(),
                json!({ "note": question }),
            ));
        }
        let has_add = tools.iter().any(|t| t.name == "add");
        // A tool message starting with '{' is the handoff marker, not an add result.
        let observed = last.role == Role::Tool && !last.content.starts_with('{');
        if has_add && observed {
            return Ok(AssistantTurn::final_text(format!(
                "The answer is {}.",
                last.content
            )));
        }
        match (has_add, parse_sum(question)) {
            (true, Some((a, b))) => Ok(AssistantTurn::tool_call("add", json!({ "a": a, "b": b }))),
            _ => Ok(AssistantTurn::final_text("I can only add two numbers, like 2+3.")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_config::load_and_apply("baton", None)?;
    env_config::init_tracing()?;
    let input = env::args()
        .nth(1)
        .unwrap_or_else(|| "compute 2+3".to_string());

    let add = FnTool::new(
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
    );

    let mut team = Team::builder(Arc::new(RuleLlm))
        .config(TeamConfig::from_env())
        .agent(
            Agent::new("Triage")
                .instructions("Decide which specialist should handle the request.")
                .handoffs(["Math"]),
        )
        .agent(
            Agent::new("Math")
                .instructions("Solve arithmetic questions using the add tool.")
                .handoff_description("Handles arithmetic questions.")
                .tool(Arc::new(add)),
        )
        .build()?;

    let out = team.run_with_history(Vec::new(), &input).await?;
    for record in &out.handoffs {
        println!("[handoff] {} -> {}", record.from, record.to);
    }
    println!("[{}] {}", out.active_agent, out.reply);
    Ok(())
}
