//! Typed access to tool call arguments.

use crate::error::RoamError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Normalize provider output: a JSON-encoded string becomes the value it encodes.
    pub fn decode(value: serde_json::Value) -> Result<Self, RoamError> {
        match value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(Self::new(serde_json::json!({})));
                }
                serde_json::from_str(trimmed).map(Self::new).map_err(|e| {
                    RoamError::InvalidArgument(format!("arguments are not valid JSON: {e}"))
                })
            }
            serde_json::Value::Null => Ok(Self::new(serde_json::json!({}))),
            other => Ok(Self::new(other)),
        }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, RoamError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| RoamError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Get a non-negative integer argument.
    pub fn get_u64(&self, key: &str) -> Result<u64, RoamError> {
        self.value
            .get(key)
            .and_then(|v| v.as_u64())
            .ok_or_else(|| RoamError::InvalidArgument(format!("Missing integer argument: {key}")))
    }

    /// Get a non-negative integer argument, falling back to `default` when absent.
    pub fn get_u64_or(&self, key: &str, default: u64) -> Result<u64, RoamError> {
        match self.value.get(key) {
            None | Some(serde_json::Value::Null) => Ok(default),
            Some(_) => self.get_u64(key),
        }
    }

    /// Deserialize the entire arguments into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, RoamError> {
        serde_json::from_value(self.value.clone()).map_err(|e| {
            RoamError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}
