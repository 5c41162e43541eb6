//! ReAct loop: one agent's think → act → observe cycle over the shared conversation.
//!
//! # Main types
//!
//! - **[`ReactLoop`]**: runs one agent until it answers, hands off, or fails.
//! - **[`Phase`]**: the loop's state machine (`Thinking`, `Acting`, `Observing`, `Done`,
//!   `Failed`).
//! - **[`LoopOutcome`]**: the two successful results, an answer or a [`HandoffSignal`].
//!
//! Each working phase has its own file: `think` calls the model, `act` dispatches a tool
//! call to a handoff or to the registry, `observe` records the observation.
//!
//! The loop appends the assistant tool-call message and its tool-result message to the
//! conversation. It never appends the final answer and never records the handoff marker;
//! both belong to the [`Team`](crate::team::Team). The active agent's system prompt is
//! prepended to each model request and is not stored.

mod act;
mod observe;
mod think;

use std::fmt;

use tracing::{debug, warn};

use crate::agent::{AgentId, AgentSlot};
use crate::error::RunError;
use crate::handoff;
use crate::llm::{AssistantTurn, LlmClient};
use crate::message::Conversation;
use crate::prompt;
use crate::tools::ToolSpec;

use act::Action;

/// State of a [`ReactLoop`]. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Thinking,
    Acting,
    Observing,
    Done,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thinking => "thinking",
            Self::Acting => "acting",
            Self::Observing => "observing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to move the conversation to another agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffSignal {
    pub target: AgentId,
    pub target_name: String,
    /// Id of the assistant tool call that requested the handoff.
    pub call_id: String,
}

/// Successful end of one loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    Answer(String),
    Handoff(HandoffSignal),
}

/// One invocation of the ReAct loop for one agent.
///
/// Holds only transient state: the iteration count and the current phase. The
/// conversation is borrowed for the duration of [`run`](Self::run).
pub struct ReactLoop<'a> {
    agents: &'a [AgentSlot],
    agent: AgentId,
    llm: &'a dyn LlmClient,
    max_turns: u32,
    handoff_prompt: bool,
    iterations: u32,
    phase: Phase,
}

impl<'a> ReactLoop<'a> {
    /// `max_turns` is the number of tool-call cycles this loop may spend.
    pub fn new(
        agents: &'a [AgentSlot],
        agent: AgentId,
        llm: &'a dyn LlmClient,
        max_turns: u32,
        handoff_prompt: bool,
    ) -> Self {
        Self {
            agents,
            agent,
            llm,
            max_turns,
            handoff_prompt,
            iterations: 0,
            phase: Phase::Thinking,
        }
    }

    /// Tool-call cycles completed so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, agent: &str, phase: Phase) {
        debug!(agent = %agent, iteration = self.iterations, from = %self.phase, to = %phase, "ReAct phase");
        self.phase = phase;
    }

    /// Runs the loop to a terminal phase.
    ///
    /// Handoff tools are synthesized here from the team's current handoff graph, so a
    /// change between loops is visible to the next one. Every call starts with a fresh
    /// turn budget.
    ///
    /// # Errors
    ///
    /// - [`RunError::TurnLimitExceeded`] when `max_turns` tool calls went by without an
    ///   answer or handoff. The model is called exactly `max_turns` times in that case.
    /// - [`RunError::Model`] when the model call fails.
    /// - [`RunError::UnknownAgent`] when `agent` is not in `agents`.
    pub async fn run(&mut self, conversation: &mut Conversation) -> Result<LoopOutcome, RunError> {
        let agents = self.agents;
        let Some(agent) = agents.get(self.agent.index()) else {
            self.phase = Phase::Failed;
            return Err(RunError::UnknownAgent(self.agent));
        };
        let handoff_tools = handoff::synthesize(agents, self.agent);
        let system = prompt::system_prompt(
            agent.instructions(),
            !handoff_tools.is_empty(),
            self.handoff_prompt,
        );
        let mut specs: Vec<ToolSpec> = agent.tools().specs();
        specs.extend(handoff_tools.iter().map(|t| t.spec()));
        debug!(
            agent = %agent.name(),
            tools = agent.tools().len(),
            handoffs = handoff_tools.len(),
            max_turns = self.max_turns,
            "ReAct loop start"
        );

        self.phase = Phase::Thinking;
        self.iterations = 0;
        loop {
            if self.iterations >= self.max_turns {
                self.enter(agent.name(), Phase::Failed);
                warn!(agent = %agent.name(), max_turns = self.max_turns, "Turn limit exceeded");
                return Err(RunError::TurnLimitExceeded {
                    agent: agent.name().to_string(),
                    max_turns: self.max_turns,
                });
            }

            let turn = match think::think(self.llm, &system, conversation, &specs).await {
                Ok(turn) => turn,
                Err(e) => {
                    self.enter(agent.name(), Phase::Failed);
                    warn!(agent = %agent.name(), error = %e, "Model call failed");
                    return Err(e.into());
                }
            };

            let (content, call) = match turn {
                AssistantTurn::Final { text } => {
                    self.enter(agent.name(), Phase::Done);
                    return Ok(LoopOutcome::Answer(text));
                }
                AssistantTurn::ToolCall { content, call } => (content, call),
            };

            self.iterations += 1;
            self.enter(agent.name(), Phase::Acting);
            match act::act(agent, &handoff_tools, conversation, content, call).await {
                Action::Handoff(signal) => {
                    self.enter(agent.name(), Phase::Done);
                    debug!(agent = %agent.name(), target = %signal.target_name, "Handoff requested");
                    return Ok(LoopOutcome::Handoff(signal));
                }
                Action::Observation { call_id, text } => {
                    self.enter(agent.name(), Phase::Observing);
                    observe::observe(conversation, call_id, text);
                    self.enter(agent.name(), Phase::Thinking);
                }
            }
        }
    }
}
