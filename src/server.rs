//! HTTP surface over [`DestinationRecommender`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::{AppConfig, ServerConfig};
use crate::error::RoamError;
use crate::recommend::DestinationRecommender;
use crate::types::{RecommendationResponse, TravelPreferences};

const SERVICE_NAME: &str = "roam";

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<DestinationRecommender>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentHealth {
    pub status: &'static str,
    pub agent: &'static str,
    pub tools_count: usize,
}

pub fn router(state: AppState, server: &ServerConfig) -> Result<Router, RoamError> {
    Ok(Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/api/recommendations/health", get(agent_health))
        .route("/api/recommendations/destinations", post(recommend_destinations))
        .layer(cors_layer(&server.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Bind and serve until the listener fails.
pub async fn serve(config: AppConfig) -> Result<(), RoamError> {
    let recommender = DestinationRecommender::from_config(&config)?;
    let state = AppState {
        recommender: Arc::new(recommender),
    };
    let app = router(state, &config.server)?;

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| RoamError::Configuration(format!("cannot bind {address}: {e}")))?;
    info!(%address, model = %config.model, "server listening");

    axum::serve(listener, app).await.map_err(|e| {
        error!(error = %e, "server terminated");
        RoamError::Configuration(format!("server error: {e}"))
    })
}

pub async fn recommend_destinations(
    State(state): State<AppState>,
    payload: Result<Json<TravelPreferences>, JsonRejection>,
) -> (StatusCode, Json<RecommendationResponse>) {
    let prefs = match payload {
        Ok(Json(prefs)) => prefs,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(RecommendationResponse::failed(rejection.body_text())),
            );
        }
    };

    match state.recommender.recommend(&prefs).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                error!(error = %err, "recommendation failed");
            } else {
                warn!(error = %err, "recommendation rejected");
            }
            (status, Json(RecommendationResponse::failed(err.to_string())))
        }
    }
}

pub async fn agent_health(State(state): State<AppState>) -> Json<AgentHealth> {
    Json(AgentHealth {
        status: "healthy",
        agent: "ready",
        tools_count: state.recommender.tools().len(),
    })
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

pub async fn service_info() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "recommend": "POST /api/recommendations/destinations",
            "agentHealth": "GET /api/recommendations/health",
            "health": "GET /health",
        }
    }))
}

/// HTTP status for an error surfaced by [`DestinationRecommender::recommend`].
pub fn status_for(err: &RoamError) -> StatusCode {
    match err {
        RoamError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        RoamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        RoamError::ModelInvocation(_) | RoamError::MaxIterationsExceeded { .. } => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, RoamError> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    if allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| {
                RoamError::Configuration(format!("invalid allowed origin '{origin}'"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_loop::{Conversation, ModelInvoker, ModelTurn};
    use crate::tools::travel::default_registry;
    use crate::tools::ToolRegistry;
    use crate::types::{AssistantMessage, Budget, TravelStyle, Usage};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct Fails;

    #[async_trait]
    impl ModelInvoker for Fails {
        async fn invoke(
            &self,
            _conversation: &Conversation,
            _tools: &ToolRegistry,
        ) -> Result<ModelTurn, RoamError> {
            Err(RoamError::ModelInvocation("openai:gpt-4o-mini: down".into()))
        }
    }

    struct Empty;

    #[async_trait]
    impl ModelInvoker for Empty {
        async fn invoke(
            &self,
            _conversation: &Conversation,
            _tools: &ToolRegistry,
        ) -> Result<ModelTurn, RoamError> {
            Ok(ModelTurn {
                message: AssistantMessage::from_parts(r#"{"destinations": []}"#, vec![]),
                usage: Usage::default(),
            })
        }
    }

    fn state(invoker: impl ModelInvoker + 'static) -> AppState {
        AppState {
            recommender: Arc::new(DestinationRecommender::new(
                Arc::new(invoker),
                Arc::new(default_registry().unwrap()),
            )),
        }
    }

    fn prefs() -> TravelPreferences {
        TravelPreferences {
            start_date: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
            budget: Budget::Fixed(1_500_000),
            number_of_people: 1,
            companion: None,
            travel_style: TravelStyle::City,
            custom_request: None,
        }
    }

    #[tokio::test]
    async fn successful_request_returns_ok() {
        let (status, Json(body)) =
            recommend_destinations(State(state(Empty)), Ok(Json(prefs()))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.destinations.is_empty());
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn model_failure_is_bad_gateway_with_envelope() {
        let (status, Json(body)) =
            recommend_destinations(State(state(Fails)), Ok(Json(prefs()))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.total_count, 0);
        assert!(body.error.unwrap().contains("down"));
    }

    #[tokio::test]
    async fn invalid_preferences_are_bad_request() {
        let mut bad = prefs();
        bad.end_date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let (status, _) = recommend_destinations(State(state(Fails)), Ok(Json(bad))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn agent_health_counts_tools() {
        let Json(body) = agent_health(State(state(Empty))).await;
        assert_eq!(
            body,
            AgentHealth {
                status: "healthy",
                agent: "ready",
                tools_count: 7
            }
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(status_for(&RoamError::Timeout(5)), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_for(&RoamError::MaxIterationsExceeded { max_iterations: 10 }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&RoamError::Configuration("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn cors_rejects_malformed_origin() {
        assert!(cors_layer(&["http://localhost:3000".into()]).is_ok());
        assert!(cors_layer(&["bad\norigin".into()]).is_err());
        assert!(cors_layer(&[]).is_ok());
    }
}
