use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{ParameterSchema, ToolSpec};

/// Error type tool implementations may fail with. The registry converts it to
/// [`ToolError::Execution`](super::ToolError::Execution) carrying its text.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A single tool that can be called by the model.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::{Map, Value};
/// use baton::tools::{BoxError, ParamType, ParameterSchema, Tool};
///
/// struct Echo {
///     params: ParameterSchema,
/// }
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn description(&self) -> &str {
///         "Echo the given text"
///     }
///
///     fn parameters(&self) -> &ParameterSchema {
///         &self.params
///     }
///
///     async fn call(&self, args: &Map<String, Value>) -> Result<String, BoxError> {
///         Ok(args["text"].as_str().unwrap_or_default().to_string())
///     }
/// }
///
/// let tool = Echo {
///     params: ParameterSchema::new().required("text", ParamType::String, "Text to echo"),
/// };
/// assert_eq!(tool.spec().name, "echo");
/// ```
///
/// # Interaction
///
/// - **ToolRegistry**: validates arguments against [`Tool::parameters`] before calling
///   [`Tool::call`], so implementations can rely on required parameters being present
///   with the declared primitive type.
/// - **ReactLoop**: sends [`Tool::spec`] to the model in every request.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within an agent's tool set.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters(&self) -> &ParameterSchema;

    /// Executes the tool with already-validated arguments.
    ///
    /// Errors and panics are caught by the registry; neither aborts the loop.
    async fn call(&self, args: &Map<String, Value>) -> Result<String, BoxError>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.parameters().to_json_schema(),
        }
    }
}
