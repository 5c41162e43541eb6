//! Language-model collaborator abstraction for the ReAct loop.
//!
//! The loop sends the active agent's system prompt followed by the whole conversation,
//! together with the specs of every tool the agent may call (its own tools plus the
//! synthesized handoff tools). The collaborator answers with either final text or a
//! single tool-call request.

mod mock;

pub use mock::{LlmRequest, MockLlm};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

/// One response from the collaborator.
///
/// **Interaction**: Returned by [`LlmClient::invoke`]; `Final` ends the loop with an
/// answer, `ToolCall` moves it to the acting phase.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantTurn {
    /// Final text answer.
    Final { text: String },
    /// A single tool-call request. `content` is any text the model emitted alongside it.
    ToolCall { content: String, call: ToolCall },
}

impl AssistantTurn {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self::Final { text: text.into() }
    }

    /// Tool-call turn with empty content and no call id.
    pub fn tool_call(name: impl Into<String>, arguments: Value) -> Self {
        Self::ToolCall {
            content: String::new(),
            call: ToolCall::new(name, arguments),
        }
    }
}

/// LLM client: given messages and available tools, returns the next assistant turn.
///
/// Implementations: [`MockLlm`] (scripted, for tests and demos); real providers live
/// outside this crate. Any error is fatal to the loop that made the call; the loop does
/// not retry.
///
/// **Interaction**: Called once per thinking phase by [`ReactLoop`](crate::react::ReactLoop).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn.
    ///
    /// `messages` starts with the active agent's system message; `tools` lists every
    /// tool the model may request in this turn.
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<AssistantTurn, AgentError>;
}
