//! Error types for the engine.
//!
//! Tool failures ([`ToolError`](crate::tools::ToolError)) are recovered inside the ReAct loop
//! and never appear here; everything in [`RunError`] ends the current run.

use thiserror::Error;

use crate::agent::AgentId;
use crate::tools::ToolError;

/// Language-model collaborator error.
///
/// Returned by [`LlmClient::invoke`](crate::llm::LlmClient::invoke). The engine does not
/// retry; any value of this type is fatal to the loop that received it.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The collaborator call failed (transport, decoding, provider error...).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

/// Fatal failure of a loop or of a whole team run. No partial answer accompanies it.
#[derive(Debug, Error)]
pub enum RunError {
    /// The per-loop turn budget ran out before the agent produced an answer or a handoff.
    #[error("agent '{agent}' exceeded the turn limit of {max_turns} tool-call cycles")]
    TurnLimitExceeded { agent: String, max_turns: u32 },

    /// More agent switches were requested within one run than the hop budget allows.
    #[error("handoff limit of {max_handoffs} hops exceeded (last requested: {from} -> {to})")]
    HandoffLoopExceeded {
        max_handoffs: u32,
        from: String,
        to: String,
    },

    /// The language-model collaborator failed.
    #[error("model collaborator error: {0}")]
    Model(#[from] AgentError),

    /// An agent id that does not belong to the team was used.
    #[error("unknown agent id {0}")]
    UnknownAgent(AgentId),
}

/// Team configuration error, raised at build time or by runtime team edits.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("a team needs at least one agent")]
    NoAgents,

    #[error("duplicate agent name: {0}")]
    DuplicateAgent(String),

    #[error("agent name '{0}' does not yield a usable handoff tool name")]
    InvalidAgentName(String),

    /// Two agents normalize to the same `switch_to_*` tool name.
    #[error("agents '{first}' and '{second}' both map to handoff tool '{tool}'")]
    HandoffNameCollision {
        first: String,
        second: String,
        tool: String,
    },

    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    #[error("tool configuration for agent '{agent}': {source}")]
    Tool {
        agent: String,
        #[source]
        source: ToolError,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of TurnLimitExceeded names the agent and the limit.
    #[test]
    fn turn_limit_display_contains_agent_and_limit() {
        let err = RunError::TurnLimitExceeded {
            agent: "Math".to_string(),
            max_turns: 3,
        };
        let s = err.to_string();
        assert!(s.contains("Math"), "{}", s);
        assert!(s.contains('3'), "{}", s);
    }

    /// **Scenario**: AgentError converts into RunError::Model via `?`.
    #[test]
    fn agent_error_converts_into_model_variant() {
        fn fail() -> Result<(), RunError> {
            Err(AgentError::ExecutionFailed("timeout".into()))?;
            Ok(())
        }
        let err = fail().unwrap_err();
        assert!(matches!(err, RunError::Model(AgentError::ExecutionFailed(ref m)) if m == "timeout"));
        assert!(err.to_string().contains("timeout"));
    }

    /// **Scenario**: BuildError::Tool keeps the agent name and the underlying tool error.
    #[test]
    fn build_error_tool_wraps_source() {
        let err = BuildError::Tool {
            agent: "Triage".into(),
            source: ToolError::Duplicate("add".into()),
        };
        let s = err.to_string();
        assert!(s.contains("Triage"), "{}", s);
        assert!(s.contains("add"), "{}", s);
        assert!(std::error::Error::source(&err).is_some());
    }
}
