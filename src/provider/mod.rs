//! Model provider trait and implementations.

pub mod http;

#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "openai-compatible")]
pub mod openai_compatible;

use async_trait::async_trait;

use crate::config::ProviderCredentials;
use crate::error::RoamError;
use crate::models::{capabilities::ModelCapabilities, LanguageModel};
use crate::types::{
    message::AgentToolCall, FinishReason, GenerationSettings, ModelMessage, ResponseFormat, Usage,
};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
    pub response_format: Option<ResponseFormat>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by all model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Capabilities of the model.
    fn capabilities(&self) -> &ModelCapabilities;

    /// Generate one assistant turn (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, RoamError>;
}

/// Create a provider for the given model, using the provided credentials.
#[allow(unused_variables)]
pub fn create_provider(
    model: &LanguageModel,
    credentials: &ProviderCredentials,
) -> Result<Box<dyn ModelProvider>, RoamError> {
    match model {
        #[cfg(feature = "openai")]
        LanguageModel::OpenAi(m) => {
            let api_key = credentials
                .get_api_key("openai")
                .ok_or_else(|| RoamError::Authentication("Missing OPENAI_API_KEY".into()))?;
            Ok(Box::new(openai::OpenAiProvider::new(
                m.clone(),
                api_key,
                credentials.get_base_url("openai"),
            )))
        }
        #[cfg(feature = "openai-compatible")]
        LanguageModel::OpenAiCompatible(m) => {
            let api_key = credentials
                .get_api_key("openai-compatible")
                .or_else(|| credentials.get_api_key("openai"))
                .ok_or_else(|| {
                    RoamError::Authentication("Missing OPENAI_COMPAT_API_KEY".into())
                })?;
            let base_url = m
                .base_url
                .clone()
                .or_else(|| credentials.get_base_url("openai-compatible"))
                .ok_or_else(|| {
                    RoamError::Configuration("Missing OPENAI_COMPAT_BASE_URL".into())
                })?;
            Ok(Box::new(openai_compatible::OpenAiCompatibleProvider::new(
                m.model_id.clone(),
                api_key,
                base_url,
            )))
        }
        LanguageModel::Custom { provider, .. } => Err(RoamError::Configuration(format!(
            "No built-in provider for '{provider}'. Use openai or openai-compatible."
        ))),
    }
}
