//! System prompts sent to the model.

/// Multi-agent context prepended to the instructions of agents that can hand off.
pub const HANDOFF_PROMPT_PREFIX: &str = "# System context
You are part of a multi-agent system designed to make agent coordination and execution easy.
The system uses two primary abstractions: **Agents** and **Handoffs**.
An agent has instructions and tools, and can hand the conversation off to another agent when appropriate.
Handoffs are performed by calling a handoff function, generally named `switch_to_<agent_name>`.
Handoffs between agents are handled seamlessly in the background; do not mention or draw attention to them in your conversation with the user.";

/// Builds the system prompt for one loop of an agent.
///
/// The prefix is added only when the agent currently has handoff tools and the team
/// enables it; the agent's stored instructions are never modified.
pub fn system_prompt(instructions: &str, has_handoffs: bool, handoff_prompt: bool) -> String {
    if has_handoffs && handoff_prompt {
        if instructions.is_empty() {
            HANDOFF_PROMPT_PREFIX.to_string()
        } else {
            format!("{}\n\n{}", HANDOFF_PROMPT_PREFIX, instructions)
        }
    } else {
        instructions.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_only_with_handoffs_and_enabled() {
        let p = system_prompt("Route requests.", true, true);
        assert!(p.starts_with(HANDOFF_PROMPT_PREFIX));
        assert!(p.ends_with("\n\nRoute requests."));
        assert_eq!(system_prompt("Route requests.", false, true), "Route requests.");
        assert_eq!(system_prompt("Route requests.", true, false), "Route requests.");
        assert_eq!(system_prompt("", true, true), HANDOFF_PROMPT_PREFIX);
    }
}
