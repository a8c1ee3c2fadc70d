//! Sampling settings and structured-output formats for a model turn.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Per-turn sampling settings. Unset fields are left to the provider default.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    /// Best-effort determinism where the provider supports it.
    pub seed: Option<u64>,
    /// Overridden by a format set on the request itself.
    pub response_format: Option<ResponseFormat>,
    pub user: Option<String>,
}

/// Shape the final answer must take.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    /// Any JSON object.
    JsonObject,
    /// JSON matching `schema`, enforced strictly by the provider.
    JsonSchema {
        schema: serde_json::Value,
        name: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_leaves_unset_fields_empty() {
        let settings = GenerationSettings::builder()
            .temperature(0.7)
            .maybe_max_tokens(None)
            .build();
        assert_eq!(settings.temperature, Some(0.7));
        assert!(settings.max_tokens.is_none());
        assert!(settings.response_format.is_none());
    }

    #[test]
    fn response_format_is_tagged() {
        let value = serde_json::to_value(ResponseFormat::JsonObject).unwrap();
        assert_eq!(value, serde_json::json!({ "type": "json_object" }));
    }
}
