//! Handoff tool synthesis.
//!
//! For an agent with peers, every peer gets a synthetic `switch_to_<peer>` tool. These
//! tools are derived from the team's current handoff graph each time a loop starts and
//! are never registered in the agent's [`ToolRegistry`](crate::tools::ToolRegistry):
//! the loop recognises a call to one and hands control back to the team instead of
//! invoking anything.

use serde_json::json;
use tracing::warn;

use crate::agent::{AgentId, AgentSlot};
use crate::tools::{ParamType, ParameterSchema, ToolSpec};

/// Reserved prefix of synthesized handoff tool names. User tools may not use it.
pub const HANDOFF_TOOL_PREFIX: &str = "switch_to_";

/// Name of the optional free-text argument of a handoff tool.
pub const HANDOFF_NOTE_PARAM: &str = "note";

/// Normalizes an agent name into an identifier fragment.
///
/// Whitespace and every character that is neither alphanumeric nor `_` become `_`
/// (non-ASCII letters and digits are kept), runs of `_` collapse into one, leading and
/// trailing `_` are trimmed and the result is lowercased. May return an empty string.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_alphanumeric() || c == '_' { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_lowercase()
}

/// Handoff tool name for an agent name, or `None` when the name normalizes to nothing.
///
/// ```
/// use baton::handoff::handoff_tool_name;
///
/// assert_eq!(handoff_tool_name("Math Expert").as_deref(), Some("switch_to_math_expert"));
/// assert_eq!(handoff_tool_name("  --  "), None);
/// ```
pub fn handoff_tool_name(agent_name: &str) -> Option<String> {
    let normalized = normalize_name(agent_name);
    if normalized.is_empty() {
        None
    } else {
        Some(format!("{}{}", HANDOFF_TOOL_PREFIX, normalized))
    }
}

/// Text content of the marker message recorded when control moves to `target_name`.
pub fn marker_content(target_name: &str) -> String {
    json!({ "assistant": target_name }).to_string()
}

/// A synthesized tool that transfers the conversation to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffTool {
    pub name: String,
    pub description: String,
    pub target: AgentId,
    pub target_name: String,
}

impl HandoffTool {
    fn for_peer(id: AgentId, peer: &AgentSlot) -> Option<Self> {
        let name = handoff_tool_name(peer.name())?;
        let mut description = format!("Transfer the conversation to the {} agent.", peer.name());
        if let Some(extra) = peer.handoff_description().filter(|d| !d.trim().is_empty()) {
            description.push(' ');
            description.push_str(extra.trim());
        }
        Some(Self {
            name,
            description,
            target: id,
            target_name: peer.name().to_string(),
        })
    }

    pub fn parameters() -> ParameterSchema {
        ParameterSchema::new().optional(
            HANDOFF_NOTE_PARAM,
            ParamType::String,
            "Optional note for the receiving agent.",
        )
    }

    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: Self::parameters().to_json_schema(),
        }
    }
}

/// Derives the handoff tools of agent `id` from the team's current handoff graph.
///
/// One tool per distinct peer, in declaration order. A peer equal to the agent itself
/// is skipped, so a handoff always moves control to a different agent.
pub fn synthesize(agents: &[AgentSlot], id: AgentId) -> Vec<HandoffTool> {
    let Some(agent) = agents.get(id.0) else {
        return Vec::new();
    };
    let mut tools: Vec<HandoffTool> = Vec::with_capacity(agent.handoffs().len());
    for &peer_id in agent.handoffs() {
        if peer_id == id {
            warn!(agent = %agent.name(), "Ignoring handoff to self");
            continue;
        }
        if tools.iter().any(|t| t.target == peer_id) {
            continue;
        }
        match agents.get(peer_id.0).and_then(|peer| HandoffTool::for_peer(peer_id, peer)) {
            Some(tool) => tools.push(tool),
            None => warn!(agent = %agent.name(), peer = %peer_id, "Skipping unresolvable handoff peer"),
        }
    }
    tools
}

/// Looks up a handoff tool by the name the model requested.
pub fn find<'a>(tools: &'a [HandoffTool], name: &str) -> Option<&'a HandoffTool> {
    tools.iter().find(|t| t.name == name)
}
