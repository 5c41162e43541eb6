//! Closure-backed tool: name, description and schema declared explicitly at construction.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{BoxError, ParameterSchema, Tool};

type ToolFn = dyn Fn(&Map<String, Value>) -> Result<String, BoxError> + Send + Sync;

/// A [`Tool`] whose logic is a synchronous closure.
///
/// # Examples
///
/// ```
/// use baton::tools::{FnTool, ParamType, ParameterSchema};
///
/// let add = FnTool::new(
///     "add",
///     "Add two integers",
///     ParameterSchema::new()
///         .required("a", ParamType::Integer, "first addend")
///         .required("b", ParamType::Integer, "second addend"),
///     |args| {
///         let a = args["a"].as_i64().unwrap_or_default();
///         let b = args["b"].as_i64().unwrap_or_default();
///         Ok((a + b).to_string())
///     },
/// );
/// ```
#[derive(Clone)]
pub struct FnTool {
    name: String,
    description: String,
    parameters: ParameterSchema,
    func: Arc<ToolFn>,
}

impl FnTool {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ParameterSchema,
        func: F,
    ) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &ParameterSchema {
        &self.parameters
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<String, BoxError> {
        (self.func)(args)
    }
}
