//! Generic OpenAI-compatible provider.

use async_trait::async_trait;

use crate::error::RoamError;
use crate::models::capabilities::ModelCapabilities;
use crate::models::openai_compatible::OpenAiCompatibleModel;

use super::openai::OpenAiProvider;
use super::{ModelProvider, ProviderRequest, ProviderResponse};

/// Generic provider for any OpenAI-compatible API.
pub struct OpenAiCompatibleProvider {
    inner: OpenAiProvider,
    capabilities: ModelCapabilities,
}

impl OpenAiCompatibleProvider {
    pub fn new(model_id: String, api_key: String, base_url: String) -> Self {
        let capabilities = OpenAiCompatibleModel::new(model_id.clone(), None).capabilities();
        let model = crate::models::openai::OpenAiModel::Custom(model_id);
        Self {
            inner: OpenAiProvider::new(model, api_key, Some(base_url)),
            capabilities,
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }
    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }
    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, RoamError> {
        self.inner.generate_text(request).await
    }
}
