//! Example: two agents that always hand off to each other stop at the handoff limit.
//!
//! Run: `cargo run -p baton-examples --example ping_pong -- 3`

use std::env;
use std::sync::Arc;

use baton::handoff::handoff_tool_name;
use baton::{Agent, AssistantTurn, MockLlm, RunError, Team};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_config::init_tracing()?;
    let max_handoffs: u32 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(baton::DEFAULT_MAX_HANDOFFS);

    // Scripted model: Ping hands to Pong, Pong hands to Ping, forever.
    let to_pong = handoff_tool_name("Pong").ok_or("bad agent name")?;
    let to_ping = handoff_tool_name("Ping").ok_or("bad agent name")?;
    let script = (0..=max_handoffs).map(|hop| {
        let target = if hop % 2 == 0 { &to_pong } else { &to_ping };
        AssistantTurn::tool_call(target.clone(), Value::Null)
    });
    let llm = Arc::new(MockLlm::new(script.collect::<Vec<_>>()));

    let mut team = Team::builder(llm.clone())
        .agent(Agent::new("Ping").handoffs(["Pong"]))
        .agent(Agent::new("Pong").handoffs(["Ping"]))
        .max_handoffs(max_handoffs)
        .build()?;

    match team.run("serve").await {
        Err(RunError::HandoffLoopExceeded { max_handoffs, from, to }) => {
            println!(
                "stopped after {} handoffs (refused {} -> {}), {} model calls",
                max_handoffs,
                from,
                to,
                llm.call_count()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
        Ok(reply) => {
            println!("unexpected reply: {}", reply);
            Ok(())
        }
    }
}
