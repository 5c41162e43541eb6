//! Tools: the [`Tool`] trait, parameter schemas, closure-backed tools and the per-agent
//! [`ToolRegistry`].
//!
//! A tool is an explicit value built at configuration time (name, description,
//! [`ParameterSchema`], invocation logic). Agents share tools by `Arc`; each agent owns a
//! registry mapping names to the tools it may call.

mod fn_tool;
mod registry;
mod schema;
mod r#trait;

pub use fn_tool::FnTool;
pub use r#trait::{BoxError, Tool};
pub use registry::ToolRegistry;
pub use schema::{ParamType, Parameter, ParameterSchema};

use serde_json::Value;
use thiserror::Error;

/// Tool specification as sent to the language model.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema object describing the arguments.
    pub input_schema: Value,
}

/// Errors from registering or invoking tools.
///
/// `Unknown`, `Argument` and `Execution` are recoverable: the ReAct loop turns their
/// text into an observation for the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("unknown tool '{name}'; available tools: [{}]", available.join(", "))]
    Unknown { name: String, available: Vec<String> },

    #[error("invalid arguments for tool '{tool}': {reason}")]
    Argument { tool: String, reason: String },

    #[error("tool '{tool}' failed: {message}")]
    Execution { tool: String, message: String },

    #[error("tool already registered: {0}")]
    Duplicate(String),

    #[error("tool name '{0}' uses the reserved handoff prefix")]
    ReservedName(String),
}
