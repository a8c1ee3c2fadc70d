//! Turns the model's final answer into validated recommendations.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::ParseError;
use crate::types::{Budget, DestinationRecommendation};

use super::MAX_RECOMMENDATIONS;

/// Keys accepted for a wrapper object around the destination list.
const WRAPPER_KEYS: [&str; 2] = ["destinations", "recommendations"];

/// Parse and validate every destination in `text`.
///
/// Accepts a bare JSON list or an object wrapping the list in one field,
/// optionally fenced in a markdown code block or surrounded by prose.
pub fn parse(text: &str) -> Result<Vec<DestinationRecommendation>, ParseError> {
    let value = extract_json(text)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => {
            let key = WRAPPER_KEYS
                .iter()
                .find(|k| obj.get(**k).is_some_and(Value::is_array))
                .map(|k| k.to_string())
                .or_else(|| match obj.len() {
                    1 => obj
                        .iter()
                        .next()
                        .filter(|(_, v)| v.is_array())
                        .map(|(k, _)| k.clone()),
                    _ => None,
                })
                .ok_or_else(|| {
                    ParseError::new(text, "expected a list or an object with a 'destinations' list")
                })?;
            match obj.remove(&key) {
                Some(Value::Array(items)) => items,
                _ => return Err(ParseError::new(text, format!("'{key}' is not a list"))),
            }
        }
        other => {
            return Err(ParseError::new(
                text,
                format!("expected a list of destinations, got {}", kind(&other)),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<DestinationRecommendation>(item)
                .map_err(|e| ParseError::new(text, format!("destination #{index}: {e}")))
        })
        .collect()
}

/// Drop entries over budget and keep the first [`MAX_RECOMMENDATIONS`].
///
/// Returns the kept entries and how many passed the budget check before
/// truncation. Model order is preserved.
pub fn shortlist(
    recommendations: Vec<DestinationRecommendation>,
    budget: &Budget,
) -> (Vec<DestinationRecommendation>, usize) {
    let mut kept: Vec<_> = recommendations
        .into_iter()
        .filter(|rec| {
            let fits = budget.allows(rec.estimated_cost);
            if !fits {
                debug!(name = %rec.name, cost = rec.estimated_cost, "over budget, dropped");
            }
            fits
        })
        .collect();
    let total = kept.len();
    kept.truncate(MAX_RECOMMENDATIONS);
    (kept, total)
}

fn extract_json(text: &str) -> Result<Value, ParseError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(ParseError::new(text, "empty response"));
    }
    if let Ok(value) = serde_json::from_str(&body) {
        return Ok(value);
    }

    // Prose around the payload: read the first complete value starting at
    // the first bracket and ignore whatever trails it.
    let start = body
        .find(['[', '{'])
        .ok_or_else(|| ParseError::new(text, "no JSON value found"))?;
    serde_json::Deserializer::from_str(&body[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| ParseError::new(text, "no JSON value found"))?
        .map_err(|e| ParseError::new(text, e.to_string()))
}

/// Strip a markdown code fence, wherever it sits in the text.
fn strip_code_fences(text: &str) -> String {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    let fence = FENCE.get_or_init(|| Regex::new(r"(?s)```[A-Za-z0-9]*[ \t]*\n?(.*?)(?:```|\z)").ok());

    let trimmed = text.trim();
    fence
        .as_ref()
        .and_then(|re| re.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
