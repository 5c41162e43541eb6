//! Tests for ToolRegistry with hand-written async tools.
//!
//! Verifies validation happens before the tool runs, async errors and panics are
//! converted, and a tool shared by `Arc` works in several registries.


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use baton::tools::{BoxError, ParamType, ParameterSchema, Tool, ToolError, ToolRegistry};
use serde_json::{json, Map, Value};

/// Async weather lookup that fails for unknown cities.
struct WeatherTool {
    params: ParameterSchema,
    calls: AtomicUsize,
}

impl WeatherTool {
    fn new() -> Self {
        Self {
            params: ParameterSchema::new()
                .required("city", ParamType::String, "City name")
                .optional("celsius", ParamType::Boolean, "Use Celsius"),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Current weather for a city"
    }

    fn parameters(&self) -> &ParameterSchema {
        &self.params
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        match args["city"].as_str() {
            Some("Paris") => Ok("sunny, 21".to_string()),
            Some("Atlantis") => panic!("city under water"),
            Some(other) => Err(format!("no station in {}", other).into()),
            None => Err("city missing".into()),
        }
    }
}

/// **Scenario**: argument errors are raised before the tool body runs.
#[tokio::test]
async fn validation_precedes_call() {
    let tool = Arc::new(WeatherTool::new());
    let mut registry = ToolRegistry::new();
    registry.register(tool.clone()).unwrap();

    let err = registry.invoke("weather", &json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::Argument { .. }));
    let err = registry
        .invoke("weather", &json!({"city": "Paris", "celsius": "yes"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("must be boolean"), "{}", err);
    assert_eq!(tool.calls.load(Ordering::SeqCst), 0);

    let out = registry
        .invoke("weather", &json!({"city": "Paris", "extra": 1}))
        .await
        .unwrap();
    assert_eq!(out, "sunny, 21");
    assert_eq!(tool.calls.load(Ordering::SeqCst), 1);
}

/// **Scenario**: async errors and panics both become Execution errors.
#[tokio::test]
async fn async_failures_become_execution_errors() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WeatherTool::new())).unwrap();

    let err = registry
        .invoke("weather", &json!({"city": "Oslo"}))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ToolError::Execution {
            tool: "weather".into(),
            message: "no station in Oslo".into(),
        }
    );

    let err = registry
        .invoke("weather", &json!({"city": "Atlantis"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("city under water"), "{}", err);
}

/// **Scenario**: one tool value shared by two registries.
#[tokio::test]
async fn shared_tool_in_two_registries() {
    let tool = Arc::new(WeatherTool::new());
    let mut first = ToolRegistry::new();
    let mut second = ToolRegistry::new();
    first.register(tool.clone()).unwrap();
    second.register(tool.clone()).unwrap();

    first.invoke("weather", &json!({"city": "Paris"})).await.unwrap();
    second.invoke("weather", &json!({"city": "Paris"})).await.unwrap();
    assert_eq!(tool.calls.load(Ordering::SeqCst), 2);
    assert_eq!(first.specs(), second.specs());
    assert_eq!(first.specs()[0].input_schema["required"], json!(["city"]));
}
