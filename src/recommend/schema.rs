//! Structured-output schema for the final answer.

use serde_json::{json, Value};

use crate::models::ModelCapabilities;
use crate::types::ResponseFormat;

pub const SCHEMA_NAME: &str = "destination_recommendations";

/// Wrapper object `{ "destinations": [...] }`, strict-mode compatible.
pub fn recommendation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "destinations": {
                "type": "array",
                "items": destination_schema(),
            }
        },
        "required": ["destinations"],
        "additionalProperties": false,
    })
}

fn destination_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "country": { "type": "string" },
            "estimatedCost": { "type": "integer", "description": "1인 기준 총 비용 (KRW)" },
            "flightCost": { "type": "integer" },
            "accommodationCost": { "type": "integer" },
            "highlights": { "type": "array", "items": { "type": "string" } },
            "reason": { "type": "string" },
            "bestSeason": { "type": "string" },
            "weather": { "type": ["string", "null"] },
            "tips": { "type": "array", "items": { "type": "string" } },
        },
        "required": [
            "name", "country", "estimatedCost", "flightCost", "accommodationCost",
            "highlights", "reason", "bestSeason", "weather", "tips"
        ],
        "additionalProperties": false,
    })
}

/// Strongest structured-output mode the model supports.
pub fn response_format_for(capabilities: &ModelCapabilities) -> Option<ResponseFormat> {
    if capabilities.supports_json_schema {
        Some(ResponseFormat::JsonSchema {
            schema: recommendation_schema(),
            name: SCHEMA_NAME.to_string(),
        })
    } else if capabilities.supports_json_mode {
        Some(ResponseFormat::JsonObject)
    } else {
        None
    }
}
