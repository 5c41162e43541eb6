//! Mock LLM for tests and examples.
//!
//! Replays a scripted queue of turns (or one turn forever) and records every request
//! so tests can assert on what each agent was shown.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{AssistantTurn, LlmClient};
use crate::message::Message;
use crate::tools::ToolSpec;

/// A request as seen by the mock: the messages and tool specs of one `invoke` call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolSpec>,
}

impl LlmRequest {
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }
}

enum Script {
    Queue(VecDeque<Result<AssistantTurn, String>>),
    Repeat(AssistantTurn),
}

/// Mock LLM: scripted assistant turns.
///
/// In queue mode each `invoke` pops the next entry; an exhausted queue returns
/// [`AgentError::ExecutionFailed`]. In repeating mode the same turn is returned forever,
/// which drives turn-limit and handoff ping-pong tests.
///
/// **Interaction**: Implements [`LlmClient`]; used by the loop and team tests.
pub struct MockLlm {
    script: Mutex<Script>,
    requests: Mutex<Vec<LlmRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLlm {
    /// Creates a mock that returns `turns` in order.
    pub fn new(turns: impl IntoIterator<Item = AssistantTurn>) -> Self {
        Self::from_script(Script::Queue(turns.into_iter().map(Ok).collect()))
    }

    /// Creates a mock that returns `turn` on every call.
    pub fn repeating(turn: AssistantTurn) -> Self {
        Self::from_script(Script::Repeat(turn))
    }

    /// Creates a mock whose first call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Vec::new()).then_error(message)
    }

    /// Appends a turn to the queue (builder). No effect in repeating mode.
    pub fn then(self, turn: AssistantTurn) -> Self {
        self.push(Ok(turn));
        self
    }

    /// Appends a failing call to the queue (builder). No effect in repeating mode.
    pub fn then_error(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    fn from_script(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, entry: Result<AssistantTurn, String>) {
        if let Script::Queue(queue) = &mut *lock(&self.script) {
            queue.push_back(entry);
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<AssistantTurn, AgentError> {
        lock(&self.requests).push(LlmRequest {
            messages: messages.to_vec(),
            tools: tools.to_vec(),
        });
        match &mut *lock(&self.script) {
            Script::Repeat(turn) => Ok(turn.clone()),
            Script::Queue(queue) => match queue.pop_front() {
                Some(Ok(turn)) => Ok(turn),
                Some(Err(message)) => Err(AgentError::ExecutionFailed(message)),
                None => Err(AgentError::ExecutionFailed(
                    "mock script exhausted".to_string(),
                )),
            },
        }
    }
}
