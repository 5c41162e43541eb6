//! Acting: record the tool call, then either signal a handoff or run the tool.

use tracing::debug;
use uuid::Uuid;

use super::HandoffSignal;
use crate::agent::AgentSlot;
use crate::handoff::{self, HandoffTool};
use crate::message::{Conversation, Message, ToolCall};

pub(super) enum Action {
    Handoff(HandoffSignal),
    /// Observation text for the call with `call_id`; tool errors arrive here as text.
    Observation { call_id: String, text: String },
}

/// Assigns an id to calls that arrive without one so the result message can link to it.
fn ensure_call_id(call: &mut ToolCall) -> String {
    match call.id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let id = format!("call_{}", Uuid::new_v4().simple());
            call.id = Some(id.clone());
            id
        }
    }
}

pub(super) async fn act(
    agent: &AgentSlot,
    handoff_tools: &[HandoffTool],
    conversation: &mut Conversation,
    content: String,
    mut call: ToolCall,
) -> Action {
    let call_id = ensure_call_id(&mut call);
    let name = call.name.clone();
    let arguments = call.arguments.clone();
    conversation.push(Message::assistant_tool_call(content, call));

    if let Some(tool) = handoff::find(handoff_tools, &name) {
        return Action::Handoff(HandoffSignal {
            target: tool.target,
            target_name: tool.target_name.clone(),
            call_id,
        });
    }

    let text = match agent.tools().invoke(&name, &arguments).await {
        Ok(text) => text,
        Err(e) => {
            debug!(agent = %agent.name(), tool = %name, error = %e, "Tool error becomes observation");
            e.to_string()
        }
    };
    Action::Observation { call_id, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ensure_call_id_keeps_existing_and_fills_missing() {
        let mut with_id = ToolCall::new("add", json!({})).with_id("c1");
        assert_eq!(ensure_call_id(&mut with_id), "c1");

        let mut without = ToolCall::new("add", json!({}));
        let id = ensure_call_id(&mut without);
        assert!(id.starts_with("call_"));
        assert_eq!(without.id.as_deref(), Some(id.as_str()));

        let mut empty = ToolCall::new("add", json!({})).with_id("");
        assert_ne!(ensure_call_id(&mut empty), "");
    }
}
