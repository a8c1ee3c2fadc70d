//! Travel lookup tools exposed to the model.
//!
//! Seven read-only tools: destination search and details, flight and
//! accommodation prices, total budget, weather, and seasonal events. Every
//! lookup goes through a [`TravelDataProvider`]; [`CatalogData`] is the
//! built-in static source.

pub mod catalog;
pub mod price;
pub mod search;
pub mod weather;

use std::sync::Arc;

pub use catalog::{CatalogData, DestinationSummary, Season, TravelDataProvider};

use super::{Tool, ToolRegistry};
use crate::error::RoamError;

/// All travel tools backed by `data`, in advertised order.
pub fn travel_tools(data: Arc<dyn TravelDataProvider>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(search::search_destinations(Arc::clone(&data))),
        Arc::new(search::get_destination_details(Arc::clone(&data))),
        Arc::new(price::get_flight_price(Arc::clone(&data))),
        Arc::new(price::get_accommodation_price(Arc::clone(&data))),
        Arc::new(price::calculate_total_budget()),
        Arc::new(weather::get_weather_forecast(Arc::clone(&data))),
        Arc::new(weather::check_seasonal_events(data)),
    ]
}

/// Registry holding the travel tools over an arbitrary data source.
pub fn registry_with(data: Arc<dyn TravelDataProvider>) -> Result<ToolRegistry, RoamError> {
    ToolRegistry::new().with_tools(travel_tools(data))
}

/// Registry holding the travel tools over the built-in catalog.
pub fn default_registry() -> Result<ToolRegistry, RoamError> {
    registry_with(Arc::new(CatalogData))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::validation::validate_output;
    use crate::tools::{ToolArguments, ToolExecutionContext};
    use crate::types::AgentToolCall;
    use serde_json::json;

    #[test]
    fn registers_seven_tools_in_order() {
        let registry = default_registry().unwrap();
        let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "search_destinations",
                "get_destination_details",
                "get_flight_price",
                "get_accommodation_price",
                "calculate_total_budget",
                "get_weather_forecast",
                "check_seasonal_events",
            ]
        );
    }

    #[test]
    fn every_tool_declares_object_parameters() {
        for def in default_registry().unwrap().definitions() {
            assert_eq!(def.parameters["type"], "object", "{}", def.name);
            assert!(!def.description.is_empty());
        }
    }

    #[tokio::test]
    async fn every_tool_result_matches_its_output_schema() {
        let calls = [
            ("search_destinations", json!({ "travel_style": "beach" })),
            ("get_destination_details", json!({ "destination_name": "다낭" })),
            ("get_flight_price", json!({ "destination": "다낭", "people": 3 })),
            ("get_accommodation_price", json!({ "destination": "다낭", "nights": 4, "people": 3 })),
            (
                "calculate_total_budget",
                json!({ "flight_cost": 900000, "accommodation_cost": 600000, "days": 5, "people": 3 }),
            ),
            ("get_weather_forecast", json!({ "destination": "다낭", "month": 1 })),
            ("check_seasonal_events", json!({ "destination": "다낭", "month": 8 })),
        ];

        let registry = default_registry().unwrap();
        assert_eq!(calls.len(), registry.len());
        for (name, args) in calls {
            let tool = registry.lookup(name).unwrap();
            let out = tool
                .execute(&ToolArguments::new(args), &ToolExecutionContext::default())
                .await
                .unwrap();
            if let Err(message) = validate_output(&out, tool.output_schema()) {
                panic!("{name}: {message}\n{out}");
            }
        }
    }

    #[tokio::test]
    async fn out_of_range_month_is_rejected_before_execution() {
        let registry = default_registry().unwrap();
        let result = registry
            .execute(&AgentToolCall {
                id: "c1".into(),
                name: "get_weather_forecast".into(),
                arguments: json!({ "destination": "다낭", "month": 13 }),
            })
            .await;
        assert!(result.is_error);
        assert_eq!(result.result["kind"], "invalid_arguments");
    }

    #[tokio::test]
    async fn unknown_style_is_rejected() {
        let registry = default_registry().unwrap();
        let result = registry
            .execute(&AgentToolCall {
                id: "c2".into(),
                name: "search_destinations".into(),
                arguments: json!({ "travel_style": "space" }),
            })
            .await;
        assert!(result.is_error);
        assert!(result.result["error"].as_str().unwrap().contains("must be one of"));
    }
}
