//! Tool parameter schemas.

use serde::{Deserialize, Serialize};

/// JSON Schema-based parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentToolParameters {
    /// JSON Schema object describing the parameters.
    pub schema: serde_json::Value,
}

impl AgentToolParameters {
    /// Create from a raw JSON Schema value.
    pub fn from_schema(schema: serde_json::Value) -> Self {
        Self { schema }
    }

    /// Create an empty parameter schema (no parameters).
    pub fn empty() -> Self {
        Self {
            schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        }
    }

    /// Builder: create an object schema with properties.
    pub fn object() -> ParameterBuilder {
        ParameterBuilder {
            properties: serde_json::Map::new(),
            required: Vec::new(),
        }
    }
}

/// Builder for constructing tool parameter schemas.
pub struct ParameterBuilder {
    properties: serde_json::Map<String, serde_json::Value>,
    required: Vec<String>,
}

impl ParameterBuilder {
    fn property(mut self, name: impl Into<String>, schema: serde_json::Value, required: bool) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), schema);
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add a string property.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        let schema = serde_json::json!({
            "type": "string",
            "description": description.into(),
        });
        self.property(name, schema, required)
    }

    /// Add an integer property with optional inclusive bounds.
    pub fn integer(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        bounds: (Option<i64>, Option<i64>),
        required: bool,
    ) -> Self {
        let mut schema = serde_json::json!({
            "type": "integer",
            "description": description.into(),
        });
        if let Some(obj) = schema.as_object_mut() {
            if let Some(min) = bounds.0 {
                obj.insert("minimum".into(), min.into());
            }
            if let Some(max) = bounds.1 {
                obj.insert("maximum".into(), max.into());
            }
        }
        self.property(name, schema, required)
    }

    /// Add an enum (string) property.
    pub fn string_enum(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        values: &[&str],
        required: bool,
    ) -> Self {
        let schema = serde_json::json!({
            "type": "string",
            "description": description.into(),
            "enum": values,
        });
        self.property(name, schema, required)
    }

    /// Build into AgentToolParameters.
    pub fn build(self) -> AgentToolParameters {
        AgentToolParameters {
            schema: serde_json::json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_records_required_and_bounds() {
        let params = AgentToolParameters::object()
            .string("destination", "Destination name", true)
            .integer("month", "Month", (Some(1), Some(12)), true)
            .integer("people", "Travellers", (Some(1), None), false)
            .build();

        let schema = &params.schema;
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["month"]["minimum"], 1);
        assert_eq!(schema["properties"]["month"]["maximum"], 12);
        assert!(schema["properties"]["people"].get("maximum").is_none());
        assert_eq!(schema["required"], serde_json::json!(["destination", "month"]));
    }

    #[test]
    fn string_enum_lists_values() {
        let params = AgentToolParameters::object()
            .string_enum("travel_style", "Style", &["beach", "city"], true)
            .build();
        let values = params.schema["properties"]["travel_style"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(values.len(), 2);
    }
}
