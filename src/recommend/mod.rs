//! Destination recommendations: prompt, run the agent loop, parse, filter.

pub mod parser;
pub mod prompt;
pub mod schema;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::agent_loop::{
    Conversation, GraphController, ModelInvoker, ProviderInvoker, RunEventSink, RunRequest,
};
use crate::config::{AppConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::RoamError;
use crate::models::ModelSelector;
use crate::provider::{create_provider, ModelProvider};
use crate::tools::travel::default_registry;
use crate::tools::ToolRegistry;
use crate::types::{GenerationSettings, RecommendationResponse, TravelPreferences};
use crate::util::timeout::with_timeout;

pub use parser::{parse, shortlist};
pub use prompt::{user_prompt, SYSTEM_PROMPT};
pub use schema::{recommendation_schema, response_format_for};

/// Most destinations returned for one request.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Answers [`TravelPreferences`] with up to [`MAX_RECOMMENDATIONS`]
/// destinations.
///
/// Shares its invoker and tool registry across requests; each call gets a
/// fresh conversation.
#[derive(Clone)]
pub struct DestinationRecommender {
    controller: GraphController,
    request_timeout: Duration,
    event_sink: Option<RunEventSink>,
}

impl DestinationRecommender {
    pub fn new(invoker: Arc<dyn ModelInvoker>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            controller: GraphController::new(invoker, tools)
                .with_max_iterations(DEFAULT_MAX_ITERATIONS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            event_sink: None,
        }
    }

    /// Build the provider, invoker and travel tools described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, RoamError> {
        let model = ModelSelector::parse(&config.model)?;
        let provider: Arc<dyn ModelProvider> =
            Arc::from(create_provider(&model, &config.credentials)?);

        if !provider.capabilities().supports_tools {
            return Err(RoamError::Configuration(format!(
                "model {model} does not support tool calling"
            )));
        }

        let settings = GenerationSettings::builder()
            .temperature(config.temperature)
            .maybe_max_tokens(config.max_tokens)
            .build();

        let mut invoker = ProviderInvoker::new(Arc::clone(&provider), settings);
        if let Some(format) = response_format_for(provider.capabilities()) {
            invoker = invoker.with_response_format(format);
        }

        info!(model = %model, "recommender ready");
        Ok(Self::new(Arc::new(invoker), Arc::new(default_registry()?))
            .with_max_iterations(config.max_iterations)
            .with_request_timeout(Duration::from_secs(config.request_timeout_secs)))
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.controller = self.controller.with_max_iterations(max_iterations);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Receive run events for every request.
    pub fn with_event_sink(mut self, sink: RunEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.controller.tools()
    }

    /// Recommend destinations for `prefs`.
    ///
    /// An unparseable final answer is not an error: the response carries an
    /// empty list and the parse failure. Invalid preferences, model failures,
    /// the iteration guard and the request timeout are errors.
    pub async fn recommend(
        &self,
        prefs: &TravelPreferences,
    ) -> Result<RecommendationResponse, RoamError> {
        prefs.validate()?;
        let started = Instant::now();

        let mut request =
            RunRequest::new(Conversation::seeded(SYSTEM_PROMPT, user_prompt(prefs)));
        if let Some(sink) = &self.event_sink {
            request = request.with_event_sink(Arc::clone(sink));
        }
        let run_id = request.run_id;
        info!(%run_id, style = %prefs.travel_style, people = prefs.number_of_people, "recommendation requested");

        let output = with_timeout(self.request_timeout, self.controller.run(request)).await?;

        let response = match parse(&output.final_text) {
            Ok(candidates) => {
                let (destinations, total_count) = shortlist(candidates, &prefs.budget);
                info!(%run_id, kept = destinations.len(), total_count, rounds = output.rounds, "recommendations ready");
                RecommendationResponse::new(destinations, total_count)
            }
            Err(err) => {
                warn!(%run_id, cause = %err.cause, raw = %err.raw, "final answer did not parse");
                RecommendationResponse::failed(RoamError::from(err).to_string())
            }
        };
        Ok(response.with_processing_time(started.elapsed().as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_loop::ModelTurn;
    use crate::types::{AssistantMessage, Budget, TravelStyle, Usage};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;

    /// Answers immediately with fixed text.
    struct Answer(String);

    #[async_trait]
    impl ModelInvoker for Answer {
        async fn invoke(
            &self,
            _conversation: &Conversation,
            _tools: &ToolRegistry,
        ) -> Result<ModelTurn, RoamError> {
            Ok(ModelTurn {
                message: AssistantMessage::from_parts(self.0.clone(), vec![]),
                usage: Usage::default(),
            })
        }
    }

    /// Never answers.
    struct Stalls;

    #[async_trait]
    impl ModelInvoker for Stalls {
        async fn invoke(
            &self,
            _conversation: &Conversation,
            _tools: &ToolRegistry,
        ) -> Result<ModelTurn, RoamError> {
            std::future::pending().await
        }
    }

    fn recommender(invoker: impl ModelInvoker + 'static) -> DestinationRecommender {
        DestinationRecommender::new(Arc::new(invoker), Arc::new(default_registry().unwrap()))
    }

    fn prefs(budget: Budget) -> TravelPreferences {
        TravelPreferences {
            start_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 6).unwrap(),
            budget,
            number_of_people: 2,
            companion: None,
            travel_style: TravelStyle::Nature,
            custom_request: None,
        }
    }

    fn destination(name: &str, cost: u64) -> serde_json::Value {
        json!({
            "name": name, "country": "한국", "estimatedCost": cost,
            "flightCost": 100000, "accommodationCost": 200000,
            "highlights": [], "reason": "r", "bestSeason": "s", "weather": null
        })
    }

    #[tokio::test]
    async fn over_budget_destination_is_dropped() {
        let answer = json!({
            "destinations": [destination("제주도", 450_000), destination("스위스", 1_000_000)]
        });
        let response = recommender(Answer(answer.to_string()))
            .recommend(&prefs(Budget::Fixed(500_000)))
            .await
            .unwrap();
        assert_eq!(response.destinations.len(), 1);
        assert_eq!(response.destinations[0].name, "제주도");
        assert_eq!(response.total_count, 1);
        assert!(response.error.is_none());
        assert!(response.total_processing_time.is_some());
    }

    #[tokio::test]
    async fn unparseable_answer_yields_empty_list_with_error() {
        let response = recommender(Answer("추천이 어렵습니다".into()))
            .recommend(&prefs(Budget::Undecided))
            .await
            .unwrap();
        assert!(response.destinations.is_empty());
        assert_eq!(response.total_count, 0);
        assert!(response.error.unwrap().contains("no JSON"));
    }

    #[tokio::test]
    async fn invalid_preferences_never_reach_the_model() {
        let mut bad = prefs(Budget::Undecided);
        bad.number_of_people = 0;
        let err = recommender(Stalls).recommend(&bad).await.unwrap_err();
        assert!(matches!(err, RoamError::InvalidArgument(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_model_times_out() {
        let err = recommender(Stalls)
            .with_request_timeout(Duration::from_secs(3))
            .recommend(&prefs(Budget::Undecided))
            .await
            .unwrap_err();
        assert!(matches!(err, RoamError::Timeout(3000)));
    }
}
