//! Validate tool call arguments and tool results against JSON Schema.

/// Validate tool arguments against a JSON Schema.
///
/// Performs top-level validation: schema type check, required field presence,
/// property type verification, string enums and integer bounds. Returns
/// `Ok(())` when valid, `Err(message)` describing the first violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    if let Some(schema_type) = schema.get("type").and_then(|v| v.as_str()) {
        if schema_type == "object" && !args.is_object() {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(args)
            ));
        }
    }

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        let obj = match args.as_object() {
            Some(obj) => obj,
            None => return Ok(()),
        };
        for field in required {
            if let Some(name) = field.as_str() {
                if !obj.contains_key(name) {
                    return Err(format!("missing required field '{name}'"));
                }
            }
        }
    }

    if let (Some(properties), Some(obj)) = (
        schema.get("properties").and_then(|v| v.as_object()),
        args.as_object(),
    ) {
        for (key, value) in obj {
            let Some(prop_schema) = properties.get(key) else {
                continue;
            };
            if let Some(expected_type) = prop_schema.get("type").and_then(|v| v.as_str()) {
                if !value_matches_type(value, expected_type) {
                    return Err(format!(
                        "field '{}' expected type '{}', got {}",
                        key,
                        expected_type,
                        json_type_name(value)
                    ));
                }
            }
            check_constraints(key, value, prop_schema)?;
            if let (Some(items), Some(elements)) = (prop_schema.get("items"), value.as_array()) {
                for (i, element) in elements.iter().enumerate() {
                    check_value(element, items, &format!("field '{key}'[{i}]"))?;
                }
            }
        }
    }

    Ok(())
}

/// Check a tool result against the tool's declared output schema.
///
/// Unlike argument validation this descends into nested objects and array
/// items.
pub fn validate_output(
    value: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    check_value(value, schema, "output")
}

fn check_value(
    value: &serde_json::Value,
    schema: &serde_json::Value,
    path: &str,
) -> Result<(), String> {
    if let Some(expected) = schema.get("type").and_then(|v| v.as_str()) {
        if !value_matches_type(value, expected) {
            return Err(format!(
                "{path} expected type '{expected}', got {}",
                json_type_name(value)
            ));
        }
    }

    if let Some(obj) = value.as_object() {
        if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
            for name in required.iter().filter_map(|v| v.as_str()) {
                if !obj.contains_key(name) {
                    return Err(format!("{path} missing required field '{name}'"));
                }
            }
        }
        if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
            for (key, field) in obj {
                if let Some(field_schema) = properties.get(key) {
                    check_value(field, field_schema, &format!("{path}.{key}"))?;
                }
            }
        }
    }

    if let (Some(items), Some(elements)) = (schema.get("items"), value.as_array()) {
        for (i, element) in elements.iter().enumerate() {
            check_value(element, items, &format!("{path}[{i}]"))?;
        }
    }

    Ok(())
}

fn check_constraints(
    key: &str,
    value: &serde_json::Value,
    prop_schema: &serde_json::Value,
) -> Result<(), String> {
    if let (Some(allowed), Some(s)) = (
        prop_schema.get("enum").and_then(|v| v.as_array()),
        value.as_str(),
    ) {
        if !allowed.iter().any(|candidate| candidate.as_str() == Some(s)) {
            let names: Vec<&str> = allowed.iter().filter_map(|v| v.as_str()).collect();
            return Err(format!(
                "field '{key}' must be one of [{}], got '{s}'",
                names.join(", ")
            ));
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = prop_schema.get("minimum").and_then(|v| v.as_f64()) {
            if n < min {
                return Err(format!("field '{key}' must be >= {min}, got {value}"));
            }
        }
        if let Some(max) = prop_schema.get("maximum").and_then(|v| v.as_f64()) {
            if n > max {
                return Err(format!("field '{key}' must be <= {max}, got {value}"));
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
