//! Team orchestrator: owns the agents, the active-agent pointer and the run loop.
//!
//! A run appends the user message, then repeatedly runs the [`ReactLoop`] of the active
//! agent over one shared [`Conversation`]. An answer ends the run. A handoff moves the
//! pointer, records a marker message and starts the target's loop on the same, unreset
//! conversation. Budget and model failures end the run with no partial answer.

mod builder;

pub use builder::TeamBuilder;

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::agent::{Agent, AgentId, AgentSlot};
use crate::config::TeamConfig;
use crate::error::{BuildError, RunError};
use crate::handoff::marker_content;
use crate::llm::LlmClient;
use crate::message::{Conversation, Message};
use crate::react::{LoopOutcome, ReactLoop};

/// One agent switch performed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffRecord {
    pub from: String,
    pub to: String,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// The final answer; also the last message of `conversation`.
    pub reply: String,
    /// Full history: seed messages, the user message, tool traffic, markers, answer.
    pub conversation: Conversation,
    /// Switches in the order they happened.
    pub handoffs: Vec<HandoffRecord>,
    /// Name of the agent that produced the answer.
    pub active_agent: String,
}

/// A set of agents with exactly one active at a time.
///
/// `run` takes `&mut self`: one team serves one conversation at a time. The active
/// pointer persists across runs; use [`set_active`](Self::set_active) to reset it.
pub struct Team {
    llm: Arc<dyn LlmClient>,
    agents: Vec<AgentSlot>,
    active: AgentId,
    config: TeamConfig,
}

impl Team {
    pub fn builder(llm: Arc<dyn LlmClient>) -> TeamBuilder {
        TeamBuilder::new(llm)
    }

    /// Runs one user message with an empty history and returns the answer.
    pub async fn run(&mut self, user_text: &str) -> Result<String, RunError> {
        self.run_with_history(Vec::new(), user_text)
            .await
            .map(|out| out.reply)
    }

    /// Runs one user message on top of `history`.
    ///
    /// # Errors
    ///
    /// - [`RunError::TurnLimitExceeded`] when an agent loop spends its whole turn budget.
    /// - [`RunError::HandoffLoopExceeded`] when the run requests more than
    ///   `max_handoffs` switches. The refused handoff call is already in the log with no
    ///   tool result, so a partial conversation must not be surfaced as-is on this error.
    /// - [`RunError::Model`] when the model call fails.
    pub async fn run_with_history(
        &mut self,
        history: Vec<Message>,
        user_text: &str,
    ) -> Result<RunOutput, RunError> {
        let span = info_span!("team_run", entry = %self.active_agent());
        self.run_inner(history, user_text).instrument(span).await
    }

    async fn run_inner(
        &mut self,
        history: Vec<Message>,
        user_text: &str,
    ) -> Result<RunOutput, RunError> {
        let mut conversation = Conversation::from_messages(history);
        conversation.push(Message::user(user_text));
        let mut handoffs: Vec<HandoffRecord> = Vec::new();

        loop {
            let from = self.active_agent().to_string();
            let mut react = ReactLoop::new(
                &self.agents,
                self.active,
                self.llm.as_ref(),
                self.config.max_turns,
                self.config.handoff_prompt,
            );
            let outcome = react.run(&mut conversation).await?;
            debug!(agent = %from, iterations = react.iterations(), "Agent loop finished");

            match outcome {
                LoopOutcome::Answer(reply) => {
                    conversation.push(Message::assistant(reply.clone()));
                    info!(agent = %from, handoffs = handoffs.len(), "Run finished");
                    return Ok(RunOutput {
                        reply,
                        conversation,
                        handoffs,
                        active_agent: from,
                    });
                }
                LoopOutcome::Handoff(signal) => {
                    if handoffs.len() >= self.config.max_handoffs as usize {
                        warn!(
                            from = %from,
                            to = %signal.target_name,
                            max_handoffs = self.config.max_handoffs,
                            "Handoff limit exceeded"
                        );
                        return Err(RunError::HandoffLoopExceeded {
                            max_handoffs: self.config.max_handoffs,
                            from,
                            to: signal.target_name,
                        });
                    }
                    conversation.push(Message::tool(
                        signal.call_id,
                        marker_content(&signal.target_name),
                    ));
                    self.active = signal.target;
                    info!(from = %from, to = %signal.target_name, hop = handoffs.len() + 1, "Handoff");
                    handoffs.push(HandoffRecord {
                        from,
                        to: signal.target_name,
                    });
                }
            }
        }
    }

    /// Name of the agent that will handle the next loop.
    pub fn active_agent(&self) -> &str {
        self.agents
            .get(self.active.index())
            .map(AgentSlot::name)
            .unwrap_or_default()
    }

    pub fn active_id(&self) -> AgentId {
        self.active
    }

    pub fn agents(&self) -> &[AgentSlot] {
        &self.agents
    }

    pub fn agent(&self, name: &str) -> Option<&AgentSlot> {
        self.agent_id(name).map(|id| &self.agents[id.index()])
    }

    pub fn agent_id(&self, name: &str) -> Option<AgentId> {
        builder::find_id(&self.agents, name)
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    /// Adds an agent after construction. Its handoffs may name any team member,
    /// itself included (self-handoffs are never offered to the model).
    pub fn add_agent(&mut self, agent: Agent) -> Result<AgentId, BuildError> {
        builder::check_new_name(&self.agents, agent.name())?;
        let names = agent.handoff_names().to_vec();
        let id = AgentId(self.agents.len());
        self.agents.push(AgentSlot::from_agent(agent)?);
        match builder::resolve(&self.agents, &names) {
            Ok(ids) => {
                self.agents[id.index()].set_handoffs(ids);
                debug!(agent = %self.agents[id.index()].name(), "Agent added");
                Ok(id)
            }
            Err(e) => {
                self.agents.pop();
                Err(e)
            }
        }
    }

    /// Replaces an agent's handoff peers. Takes effect at the agent's next loop.
    pub fn set_handoffs<I, S>(&mut self, agent: &str, peers: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = self
            .agent_id(agent)
            .ok_or_else(|| BuildError::UnknownAgent(agent.to_string()))?;
        let names: Vec<S> = peers.into_iter().collect();
        let ids = builder::resolve(&self.agents, &names)?;
        self.agents[id.index()].set_handoffs(ids);
        Ok(())
    }

    /// Moves the active pointer, e.g. back to the entry agent between runs.
    pub fn set_active(&mut self, agent: &str) -> Result<(), BuildError> {
        self.active = self
            .agent_id(agent)
            .ok_or_else(|| BuildError::UnknownAgent(agent.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Team")
            .field("agents", &self.agents.iter().map(AgentSlot::name).collect::<Vec<_>>())
            .field("active", &self.active_agent())
            .field("config", &self.config)
            .finish()
    }
}
