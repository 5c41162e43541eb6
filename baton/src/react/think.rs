//! Thinking: send system prompt + conversation + tool specs to the model.

use crate::error::AgentError;
use crate::llm::{AssistantTurn, LlmClient};
use crate::message::{Conversation, Message};
use crate::tools::ToolSpec;

/// Request messages: the agent's system prompt (when non-empty) followed by the
/// whole conversation.
pub(super) fn request_messages(system: &str, conversation: &Conversation) -> Vec<Message> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    if !system.is_empty() {
        messages.push(Message::system(system));
    }
    messages.extend_from_slice(conversation.messages());
    messages
}

pub(super) async fn think(
    llm: &dyn LlmClient,
    system: &str,
    conversation: &Conversation,
    specs: &[ToolSpec],
) -> Result<AssistantTurn, AgentError> {
    let messages = request_messages(system, conversation);
    llm.invoke(&messages, specs).await
}
