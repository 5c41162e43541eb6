//! Agent configuration and the resolved per-team agent record.
//!
//! [`Agent`] is the value callers build: name, instructions, tools and the names of the
//! peers it may hand off to. A [`Team`](crate::team::Team) turns each one into an
//! [`AgentSlot`] stored in an arena and addressed by [`AgentId`], so cyclic handoff
//! graphs are plain indices rather than ownership edges.

use std::fmt;
use std::sync::Arc;

use crate::error::BuildError;
use crate::tools::{Tool, ToolRegistry};

/// Index of an agent inside its team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub(crate) usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Agent configuration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use baton::tools::{FnTool, ParameterSchema};
/// use baton::Agent;
///
/// let triage = Agent::new("Triage")
///     .instructions("Route the user to the right specialist.")
///     .handoffs(["Math"]);
/// let math = Agent::new("Math")
///     .instructions("Solve arithmetic with the add tool.")
///     .handoff_description("Handles arithmetic questions.")
///     .tool(Arc::new(FnTool::new("add", "Add", ParameterSchema::new(), |_| Ok("0".into()))));
/// assert_eq!(triage.handoff_names(), ["Math".to_string()]);
/// assert_eq!(math.name(), "Math");
/// ```
#[derive(Clone)]
pub struct Agent {
    name: String,
    instructions: String,
    handoff_description: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
    handoffs: Vec<String>,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            handoff_description: None,
            tools: Vec::new(),
            handoffs: Vec::new(),
        }
    }

    /// System-level directive text.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Text shown to other agents deciding whether to transfer to this one.
    pub fn handoff_description(mut self, description: impl Into<String>) -> Self {
        self.handoff_description = Some(description.into());
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Names of the peers this agent may hand off to; resolved when the team is built.
    pub fn handoffs<I, S>(mut self, peers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handoffs = peers.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handoff_names(&self) -> &[String] {
        &self.handoffs
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .field("handoffs", &self.handoffs)
            .finish_non_exhaustive()
    }
}

/// An agent as stored in a team: tools registered, handoffs resolved to ids.
#[derive(Debug, Clone)]
pub struct AgentSlot {
    name: String,
    instructions: String,
    handoff_description: Option<String>,
    tools: ToolRegistry,
    handoffs: Vec<AgentId>,
}

impl AgentSlot {
    /// Registers the agent's tools. Handoffs start empty; the team resolves them.
    pub(crate) fn from_agent(agent: Agent) -> Result<Self, BuildError> {
        let mut tools = ToolRegistry::new();
        for tool in agent.tools {
            tools.register(tool).map_err(|source| BuildError::Tool {
                agent: agent.name.clone(),
                source,
            })?;
        }
        Ok(Self {
            name: agent.name,
            instructions: agent.instructions,
            handoff_description: agent.handoff_description,
            tools,
            handoffs: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn handoff_description(&self) -> Option<&str> {
        self.handoff_description.as_deref()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn handoffs(&self) -> &[AgentId] {
        &self.handoffs
    }

    pub(crate) fn set_handoffs(&mut self, handoffs: Vec<AgentId>) {
        self.handoffs = handoffs;
    }
}
