//! Which model answers recommendation requests, and what it can do.

pub mod capabilities;
pub mod selector;

#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "openai-compatible")]
pub mod openai_compatible;

pub use capabilities::ModelCapabilities;
pub use selector::ModelSelector;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A model resolved from a `provider:model` selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "provider", content = "model")]
pub enum LanguageModel {
    #[cfg(feature = "openai")]
    OpenAi(openai::OpenAiModel),
    #[cfg(feature = "openai-compatible")]
    OpenAiCompatible(openai_compatible::OpenAiCompatibleModel),
    /// Provider with no built-in client; kept so the selector round-trips.
    Custom { provider: String, model_id: String },
}

impl LanguageModel {
    /// Identifier sent to the provider API.
    pub fn model_id(&self) -> &str {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(m) => m.as_str(),
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(m) => &m.model_id,
            Self::Custom { model_id, .. } => model_id,
        }
    }

    pub fn provider_name(&self) -> &str {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(_) => "openai",
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(_) => "openai-compatible",
            Self::Custom { provider, .. } => provider,
        }
    }

    pub fn capabilities(&self) -> ModelCapabilities {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(m) => m.capabilities(),
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(m) => m.capabilities(),
            Self::Custom { .. } => ModelCapabilities::default(),
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_name(), self.model_id())
    }
}
