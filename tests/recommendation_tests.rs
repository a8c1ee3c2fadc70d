//! End-to-end recommendation runs over a scripted provider.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{destination, preferences, recommender, MockProvider};
use roam::error::RoamError;
use roam::types::{DestinationRecommendation, Role};

#[tokio::test]
async fn beach_trip_keeps_destinations_within_headroom() {
    let provider = Arc::new(MockProvider::new("mock-1"));
    provider.queue_tool_calls(&[("c1", "search_destinations", json!({ "travel_style": "beach" }))]);
    provider.queue_tool_calls(&[
        ("c2", "get_flight_price", json!({ "destination": "다낭", "people": 2 })),
        ("c3", "get_flight_price", json!({ "destination": "발리", "people": 2 })),
    ]);
    provider.queue_response(
        &json!({
            "destinations": [
                destination("다낭", "베트남", 1_800_000),
                destination("발리", "인도네시아", 2_200_000),
                destination("몰디브", "몰디브", 3_500_000),
            ]
        })
        .to_string(),
    );

    let response = recommender(provider.clone())
        .recommend(&preferences("beach", json!(2_000_000)))
        .await
        .unwrap();

    let names: Vec<&str> = response.destinations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["다낭", "발리"]);
    assert_eq!(response.total_count, 2);
    assert!(response.error.is_none());
    assert!(response
        .destinations
        .iter()
        .all(|d| d.estimated_cost <= 2_200_000));

    // Third request sees both flight lookups answered, in call order.
    let requests = provider.requests();
    assert_eq!(requests.len(), 3);
    let tool_ids: Vec<&str> = requests[2]
        .messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .filter_map(|m| m.tool_call_id())
        .collect();
    assert_eq!(tool_ids, vec!["c1", "c2", "c3"]);
    assert_eq!(requests[0].tools.as_ref().map(Vec::len), Some(7));
}

#[tokio::test]
async fn nature_trip_drops_expensive_destination() {
    let provider = Arc::new(MockProvider::new("mock-1"));
    provider.queue_response(
        &json!([
            destination("제주도", "한국", 480_000),
            destination("반프", "캐나다", 1_000_000),
        ])
        .to_string(),
    );

    let response = recommender(provider)
        .recommend(&preferences("nature", json!(500_000)))
        .await
        .unwrap();

    assert_eq!(response.destinations.len(), 1);
    assert_eq!(response.destinations[0].name, "제주도");
}

#[tokio::test]
async fn undecided_budget_keeps_first_five_in_model_order() {
    let provider = Arc::new(MockProvider::new("mock-1"));
    let all: Vec<_> = (1..=7)
        .map(|i| destination(&format!("여행지{i}"), "어딘가", i * 10_000_000))
        .collect();
    provider.queue_response(&json!({ "destinations": all }).to_string());

    let response = recommender(provider)
        .recommend(&preferences("adventure", json!("undecided")))
        .await
        .unwrap();

    let names: Vec<&str> = response.destinations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["여행지1", "여행지2", "여행지3", "여행지4", "여행지5"]);
    assert_eq!(response.total_count, 7);
}

#[tokio::test]
async fn recommendations_survive_serialization() {
    let provider = Arc::new(MockProvider::new("mock-1"));
    let mut with_null_weather = destination("교토", "일본", 1_200_000);
    with_null_weather["weather"] = json!(null);
    provider.queue_response(
        &format!("```json\n{}\n```", json!([destination("도쿄", "일본", 1_500_000), with_null_weather])),
    );

    let response = recommender(provider)
        .recommend(&preferences("culture", json!(2_000_000)))
        .await
        .unwrap();

    let text = serde_json::to_string(&response.destinations).unwrap();
    let back: Vec<DestinationRecommendation> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, response.destinations);
    assert_eq!(back[1].weather, None);
}

#[tokio::test]
async fn malformed_answer_returns_empty_list_and_error() {
    let provider = Arc::new(MockProvider::new("mock-1"));
    provider.queue_response("Here are my picks: Danang, Bali.");

    let response = recommender(provider)
        .recommend(&preferences("beach", json!(2_000_000)))
        .await
        .unwrap();

    assert!(response.destinations.is_empty());
    assert_eq!(response.total_count, 0);
    assert!(response.error.unwrap().starts_with("Failed to parse recommendations"));
}

#[tokio::test]
async fn endless_tool_requests_hit_the_iteration_guard() {
    let provider = Arc::new(MockProvider::new("mock-1"));
    for i in 0..10 {
        let id = format!("c{i}");
        provider.queue_tool_calls(&[(
            id.as_str(),
            "get_weather_forecast",
            json!({ "destination": "발리", "month": 8 }),
        )]);
    }

    let err = recommender(provider.clone())
        .with_max_iterations(3)
        .recommend(&preferences("beach", json!(2_000_000)))
        .await
        .unwrap_err();

    assert!(matches!(err, RoamError::MaxIterationsExceeded { max_iterations: 3 }));
    assert_eq!(provider.requests().len(), 4);
}

#[tokio::test]
async fn provider_failure_surfaces_as_model_invocation() {
    let provider = Arc::new(MockProvider::new("mock-1"));

    let err = recommender(provider)
        .recommend(&preferences("city", json!(1_000_000)))
        .await
        .unwrap_err();

    match err {
        RoamError::ModelInvocation(message) => assert!(message.starts_with("mock:mock-1")),
        other => panic!("expected ModelInvocation, got {other:?}"),
    }
}
