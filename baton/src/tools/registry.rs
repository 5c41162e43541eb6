use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use super::{Tool, ToolError, ToolSpec};
use crate::handoff::HANDOFF_TOOL_PREFIX;

/// Truncates a string for logging, appending "..." if longer than max_len.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

/// The tool set of one agent: name → tool, in registration order.
///
/// Tools are shared by `Arc`, so one tool value can sit in several agents' registries.
/// Apart from the mapping the registry holds no state; invoking a tool never changes it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use baton::tools::{FnTool, ParameterSchema, ToolRegistry};
///
/// let mut registry = ToolRegistry::new();
/// let ping = Arc::new(FnTool::new("ping", "Ping", ParameterSchema::new(), |_| Ok("pong".into())));
/// registry.register(ping.clone()).unwrap();
/// assert!(registry.register(ping).is_err());
/// assert_eq!(registry.names(), vec!["ping"]);
/// ```
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool.
    ///
    /// # Errors
    ///
    /// - [`ToolError::Duplicate`] when the name is already registered here.
    /// - [`ToolError::ReservedName`] when the name starts with the handoff prefix, which is
    ///   reserved for synthesized handoff tools.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name();
        if name.starts_with(HANDOFF_TOOL_PREFIX) {
            return Err(ToolError::ReservedName(name.to_string()));
        }
        if self.contains(name) {
            return Err(ToolError::Duplicate(name.to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Specs of all registered tools, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Validates `arguments` and calls the named tool.
    ///
    /// `null` arguments are treated as an empty object. Whatever the tool does, the
    /// failure comes back as a [`ToolError`]: an `Err` from the tool or a panic inside it
    /// both become [`ToolError::Execution`] carrying the original text.
    ///
    /// # Errors
    ///
    /// - [`ToolError::Unknown`] when `name` is not registered.
    /// - [`ToolError::Argument`] when `arguments` is not an object, misses a required
    ///   parameter or has a value of the wrong primitive type.
    /// - [`ToolError::Execution`] when the tool fails.
    pub async fn invoke(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
        let tool = self.get(name).ok_or_else(|| ToolError::Unknown {
            name: name.to_string(),
            available: self.names().into_iter().map(String::from).collect(),
        })?;

        let empty = Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(ToolError::Argument {
                    tool: name.to_string(),
                    reason: format!("arguments must be a JSON object, got {}", other),
                })
            }
        };
        tool.parameters()
            .validate(args)
            .map_err(|reason| ToolError::Argument {
                tool: name.to_string(),
                reason,
            })?;

        debug!(tool = %name, args = %arguments, "Calling tool");
        match AssertUnwindSafe(tool.call(args)).catch_unwind().await {
            Ok(Ok(text)) => {
                trace!(
                    tool = %name,
                    result_len = text.len(),
                    result_preview = %truncate_for_log(&text, 200),
                    "Tool returned"
                );
                Ok(text)
            }
            Ok(Err(e)) => {
                warn!(tool = %name, error = %e, "Tool call failed");
                Err(ToolError::Execution {
                    tool: name.to_string(),
                    message: e.to_string(),
                })
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(tool = %name, error = %message, "Tool panicked");
                Err(ToolError::Execution {
                    tool: name.to_string(),
                    message,
                })
            }
        }
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
