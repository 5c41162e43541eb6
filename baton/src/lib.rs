//! # Baton
//!
//! ReAct agents that pass a conversation to one another. One agent reasons over a set
//! of tools in a think → act → observe loop; a [`Team`] of such agents hands control
//! from agent to agent through synthesized `switch_to_<agent>` tools while every agent
//! works on the same append-only [`Conversation`].
//!
//! ## Design principles
//!
//! - **Explicit tools**: a tool is a value (name, description, [`ParameterSchema`],
//!   logic) built at configuration time; [`FnTool`] wraps a closure.
//! - **Recoverable tool errors**: unknown tools, bad arguments, failing or panicking
//!   tools become observations the model can react to.
//! - **Bounded runs**: a per-loop turn budget and a per-run handoff budget end every run.
//! - **Arena of agents**: agents live in the team and refer to peers by [`AgentId`], so
//!   cyclic handoff graphs need no shared ownership.
//!
//! ## Main modules
//!
//! - [`tools`]: [`Tool`], [`ToolRegistry`], [`ParameterSchema`], [`FnTool`], [`ToolError`].
//! - [`llm`]: [`LlmClient`], [`AssistantTurn`], [`MockLlm`].
//! - [`react`]: [`ReactLoop`], [`Phase`], [`LoopOutcome`], [`HandoffSignal`].
//! - [`handoff`]: handoff tool naming and synthesis.
//! - [`team`]: [`Team`], [`TeamBuilder`], [`RunOutput`].
//! - [`config`]: [`TeamConfig`] and its environment loading.
//! - [`message`]: [`Message`], [`Role`], [`ToolCall`], [`Conversation`].
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use baton::llm::{AssistantTurn, MockLlm};
//! use baton::tools::{FnTool, ParamType, ParameterSchema};
//! use baton::{Agent, Team};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let add = FnTool::new(
//!     "add",
//!     "Add two integers",
//!     ParameterSchema::new()
//!         .required("a", ParamType::Integer, "first addend")
//!         .required("b", ParamType::Integer, "second addend"),
//!     |args| {
//!         let a = args["a"].as_i64().unwrap_or_default();
//!         let b = args["b"].as_i64().unwrap_or_default();
//!         Ok((a + b).to_string())
//!     },
//! );
//! let llm = Arc::new(MockLlm::new([
//!     AssistantTurn::tool_call("switch_to_math", json!({})),
//!     AssistantTurn::tool_call("add", json!({"a": 2, "b": 3})),
//!     AssistantTurn::final_text("2 + 3 = 5"),
//! ]));
//!
//! let mut team = Team::builder(llm)
//!     .agent(Agent::new("Triage").handoffs(["Math"]))
//!     .agent(Agent::new("Math").tool(Arc::new(add)))
//!     .build()?;
//! assert_eq!(team.run("compute 2+3").await?, "2 + 3 = 5");
//! assert_eq!(team.active_agent(), "Math");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod handoff;
pub mod llm;
pub mod message;
pub mod prompt;
pub mod react;
pub mod team;
pub mod tools;

pub use agent::{Agent, AgentId, AgentSlot};
pub use config::{TeamConfig, DEFAULT_MAX_HANDOFFS, DEFAULT_MAX_TURNS};
pub use error::{AgentError, BuildError, RunError};
pub use llm::{AssistantTurn, LlmClient, MockLlm};
pub use message::{Conversation, Message, Role, ToolCall};
pub use react::{HandoffSignal, LoopOutcome, Phase, ReactLoop};
pub use team::{HandoffRecord, RunOutput, Team, TeamBuilder};
pub use tools::{FnTool, ParamType, ParameterSchema, Tool, ToolError, ToolRegistry, ToolSpec};
