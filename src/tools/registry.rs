//! Fixed catalog of tools available to the agent loop.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::validation::{validate_arguments, validate_output};
use crate::error::RoamError;
use crate::provider::ToolDefinition;
use crate::types::{AgentToolCall, AgentToolResult};

/// Named tools, in registration order.
///
/// Populated once at startup and then shared read-only (usually behind an
/// `Arc`) by every request.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RoamError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(RoamError::Configuration(format!(
                "tool '{name}' is already registered"
            )));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Builder-style registration of several tools.
    pub fn with_tools(
        mut self,
        tools: impl IntoIterator<Item = Arc<dyn Tool>>,
    ) -> Result<Self, RoamError> {
        for tool in tools {
            self.register(tool)?;
        }
        Ok(self)
    }

    pub fn lookup(&self, name: &str) -> Result<&Arc<dyn Tool>, RoamError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| RoamError::ToolNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    /// Tool signatures advertised to the model provider.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect()
    }

    /// Run one tool call. Failures come back as an error payload for the model,
    /// never as an `Err`.
    pub async fn execute(&self, call: &AgentToolCall) -> AgentToolResult {
        match self.try_execute(call).await {
            Ok(value) => {
                debug!(tool = %call.name, tool_call_id = %call.id, "tool call succeeded");
                AgentToolResult::ok(call.id.clone(), value)
            }
            Err(err) => {
                warn!(tool = %call.name, tool_call_id = %call.id, error = %err, "tool call failed");
                AgentToolResult {
                    tool_call_id: call.id.clone(),
                    result: error_payload(&err),
                    is_error: true,
                }
            }
        }
    }

    /// Run one tool call, keeping the typed error.
    pub async fn try_execute(&self, call: &AgentToolCall) -> Result<serde_json::Value, RoamError> {
        let tool = self.lookup(&call.name)?;
        let argument_error = |message: String| RoamError::ToolArgument {
            tool_name: call.name.clone(),
            message,
        };

        let args = ToolArguments::decode(call.arguments.clone())
            .map_err(|e| argument_error(e.to_string()))?;
        validate_arguments(args.raw(), &tool.parameters().schema).map_err(argument_error)?;

        let ctx = ToolExecutionContext {
            tool_call_id: Some(call.id.clone()),
            tool_name: Some(call.name.clone()),
        };
        let output = tool.execute(&args, &ctx).await.map_err(|err| match err {
            RoamError::InvalidArgument(message) => argument_error(message),
            err if err.is_model_visible() => err,
            other => RoamError::tool(call.name.clone(), other.to_string()),
        })?;
        validate_output(&output, tool.output_schema()).map_err(|message| {
            RoamError::tool(call.name.clone(), format!("result does not match output schema: {message}"))
        })?;
        Ok(output)
    }
}

fn error_kind(err: &RoamError) -> &'static str {
    match err {
        RoamError::ToolNotFound(_) => "unknown_tool",
        RoamError::ToolArgument { .. } => "invalid_arguments",
        _ => "execution_failed",
    }
}

/// Error payload handed back to the model in place of a tool result.
fn error_payload(err: &RoamError) -> serde_json::Value {
    serde_json::json!({
        "error": err.to_string(),
        "kind": error_kind(err),
    })
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}
