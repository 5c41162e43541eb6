//! Team construction and the validation shared with runtime team edits.

use std::sync::Arc;

use crate::agent::{Agent, AgentId, AgentSlot};
use crate::config::TeamConfig;
use crate::error::BuildError;
use crate::handoff::handoff_tool_name;
use crate::llm::LlmClient;

use super::Team;

/// Builder for [`Team`].
///
/// Agents are kept in the order they are added; the entry agent defaults to the first.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use baton::llm::{AssistantTurn, MockLlm};
/// use baton::{Agent, Team};
///
/// let llm = Arc::new(MockLlm::repeating(AssistantTurn::final_text("hi")));
/// let team = Team::builder(llm)
///     .agent(Agent::new("Triage").handoffs(["Math"]))
///     .agent(Agent::new("Math"))
///     .max_turns(4)
///     .build()
///     .unwrap();
/// assert_eq!(team.active_agent(), "Triage");
/// ```
pub struct TeamBuilder {
    llm: Arc<dyn LlmClient>,
    agents: Vec<Agent>,
    entry: Option<String>,
    config: TeamConfig,
}

impl TeamBuilder {
    pub(super) fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            agents: Vec::new(),
            entry: None,
            config: TeamConfig::default(),
        }
    }

    pub fn agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Name of the agent that starts active. Default: the first agent.
    pub fn entry(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Replaces the whole configuration. Later setters still override single fields.
    pub fn config(mut self, config: TeamConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    pub fn max_handoffs(mut self, max_handoffs: u32) -> Self {
        self.config.max_handoffs = max_handoffs;
        self
    }

    pub fn handoff_prompt(mut self, enabled: bool) -> Self {
        self.config.handoff_prompt = enabled;
        self
    }

    /// Validates the configuration, registers tools and resolves handoffs by name.
    ///
    /// # Errors
    ///
    /// Any [`BuildError`]: no agents, a duplicate or unusable agent name, two names
    /// mapping to one handoff tool, a tool registration failure, a handoff or entry
    /// naming an agent that is not in the team, or `max_turns == 0`.
    pub fn build(self) -> Result<Team, BuildError> {
        self.config.validate()?;
        if self.agents.is_empty() {
            return Err(BuildError::NoAgents);
        }

        let mut slots: Vec<AgentSlot> = Vec::with_capacity(self.agents.len());
        let mut handoff_names: Vec<Vec<String>> = Vec::with_capacity(self.agents.len());
        for agent in self.agents {
            check_new_name(&slots, agent.name())?;
            handoff_names.push(agent.handoff_names().to_vec());
            slots.push(AgentSlot::from_agent(agent)?);
        }
        let resolved = handoff_names
            .iter()
            .map(|names| resolve(&slots, names))
            .collect::<Result<Vec<_>, _>>()?;
        for (slot, ids) in slots.iter_mut().zip(resolved) {
            slot.set_handoffs(ids);
        }

        let active = match &self.entry {
            Some(name) => {
                find_id(&slots, name).ok_or_else(|| BuildError::UnknownAgent(name.clone()))?
            }
            None => AgentId(0),
        };

        Ok(Team {
            llm: self.llm,
            agents: slots,
            active,
            config: self.config,
        })
    }
}

pub(super) fn find_id(agents: &[AgentSlot], name: &str) -> Option<AgentId> {
    agents.iter().position(|a| a.name() == name).map(AgentId)
}

/// Checks that `name` can join `agents`: unique, and mapping to a handoff tool name no
/// other agent maps to.
pub(super) fn check_new_name(agents: &[AgentSlot], name: &str) -> Result<(), BuildError> {
    let tool = handoff_tool_name(name).ok_or_else(|| BuildError::InvalidAgentName(name.to_string()))?;
    for existing in agents {
        if existing.name() == name {
            return Err(BuildError::DuplicateAgent(name.to_string()));
        }
        if handoff_tool_name(existing.name()).as_deref() == Some(tool.as_str()) {
            return Err(BuildError::HandoffNameCollision {
                first: existing.name().to_string(),
                second: name.to_string(),
                tool,
            });
        }
    }
    Ok(())
}

/// Resolves peer names to ids, keeping order and dropping repeats.
pub(super) fn resolve<S: AsRef<str>>(
    agents: &[AgentSlot],
    names: &[S],
) -> Result<Vec<AgentId>, BuildError> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let id = find_id(agents, name).ok_or_else(|| BuildError::UnknownAgent(name.to_string()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AssistantTurn, MockLlm};

    fn llm() -> Arc<dyn LlmClient> {
        Arc::new(MockLlm::repeating(AssistantTurn::final_text("ok")))
    }

    #[test]
    fn build_defaults_entry_to_first_agent() {
        let team = Team::builder(llm())
            .agent(Agent::new("A").handoffs(["B"]))
            .agent(Agent::new("B").handoffs(["A"]))
            .build()
            .unwrap();
        assert_eq!(team.active_agent(), "A");
        assert_eq!(team.config(), &TeamConfig::default());
        assert_eq!(team.agents()[0].handoffs(), &[AgentId(1)]);
        assert_eq!(team.agents()[1].handoffs(), &[AgentId(0)]);
    }

    #[test]
    fn build_uses_named_entry() {
        let team = Team::builder(llm())
            .agents([Agent::new("A"), Agent::new("B")])
            .entry("B")
            .build()
            .unwrap();
        assert_eq!(team.active_agent(), "B");
    }

    #[test]
    fn build_rejects_empty_team() {
        assert!(matches!(Team::builder(llm()).build(), Err(BuildError::NoAgents)));
    }

    #[test]
    fn build_rejects_zero_turns() {
        let err = Team::builder(llm())
            .agent(Agent::new("A"))
            .max_turns(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfig(_)));
    }

    /// **Scenario**: names that normalize to one handoff tool cannot share a team.
    #[test]
    fn build_rejects_colliding_names() {
        let err = Team::builder(llm())
            .agent(Agent::new("Math Expert"))
            .agent(Agent::new("math-expert"))
            .build()
            .unwrap_err();
        match err {
            BuildError::HandoffNameCollision { first, second, tool } => {
                assert_eq!(first, "Math Expert");
                assert_eq!(second, "math-expert");
                assert_eq!(tool, "switch_to_math_expert");
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn build_rejects_duplicate_and_invalid_names() {
        let err = Team::builder(llm())
            .agents([Agent::new("A"), Agent::new("A")])
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateAgent(ref n) if n == "A"));

        let err = Team::builder(llm()).agent(Agent::new("???")).build().unwrap_err();
        assert!(matches!(err, BuildError::InvalidAgentName(_)));
    }

    #[test]
    fn build_rejects_unknown_handoff_and_entry() {
        let err = Team::builder(llm())
            .agent(Agent::new("A").handoffs(["Ghost"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownAgent(ref n) if n == "Ghost"));

        let err = Team::builder(llm())
            .agent(Agent::new("A"))
            .entry("Ghost")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownAgent(_)));
    }

    #[test]
    fn resolve_drops_repeats() {
        let team = Team::builder(llm())
            .agent(Agent::new("A").handoffs(["B", "B"]))
            .agent(Agent::new("B"))
            .build()
            .unwrap();
        assert_eq!(team.agents()[0].handoffs().len(), 1);
    }
}
