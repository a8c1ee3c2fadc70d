//! Shared test helpers: a scripted provider and recommendation fixtures.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use roam::agent_loop::ProviderInvoker;
use roam::error::RoamError;
use roam::models::capabilities::ModelCapabilities;
use roam::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use roam::recommend::DestinationRecommender;
use roam::tools::travel::default_registry;
use roam::types::*;

/// A provider that plays back queued responses and records every request.
pub struct MockProvider {
    model_id: String,
    capabilities: ModelCapabilities,
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            capabilities: ModelCapabilities::full(128_000),
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a final text answer.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        });
    }

    /// Queue one assistant turn requesting `calls` (id, name, arguments).
    pub fn queue_tool_calls(&self, calls: &[(&str, &str, Value)]) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: calls
                .iter()
                .map(|(id, name, args)| AgentToolCall {
                    id: id.to_string(),
                    name: name.to_string(),
                    arguments: args.clone(),
                })
                .collect(),
            finish_reason: Some(FinishReason::ToolCalls),
        });
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse, RoamError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(RoamError::api(500, "no scripted response left"));
        }
        Ok(responses.remove(0))
    }
}

/// Recommender over `provider` and the built-in travel tools.
pub fn recommender(provider: Arc<MockProvider>) -> DestinationRecommender {
    let invoker = ProviderInvoker::new(provider, GenerationSettings::default());
    DestinationRecommender::new(Arc::new(invoker), Arc::new(default_registry().unwrap()))
}

pub fn preferences(style: &str, budget: Value) -> TravelPreferences {
    serde_json::from_value(json!({
        "startDate": "2024-08-01",
        "endDate": "2024-08-06",
        "budget": budget,
        "numberOfPeople": 2,
        "travelStyle": style,
    }))
    .unwrap()
}

/// One destination as the model would write it.
pub fn destination(name: &str, country: &str, cost: u64) -> Value {
    json!({
        "name": name,
        "country": country,
        "estimatedCost": cost,
        "flightCost": cost / 4,
        "accommodationCost": cost / 5,
        "highlights": ["명소"],
        "reason": format!("{name} 추천"),
        "bestSeason": "연중",
        "weather": "맑음",
        "tips": ["여권 확인"],
    })
}
