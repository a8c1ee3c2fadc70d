//! Convenience re-exports for common use.

pub use crate::agent_loop::{Conversation, GraphController, ModelInvoker, RunRequest};
pub use crate::config::AppConfig;
pub use crate::error::{ParseError, Result, RoamError};
pub use crate::models::LanguageModel;
pub use crate::provider::ModelProvider;
pub use crate::recommend::DestinationRecommender;
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments, ToolRegistry};
pub use crate::types::{
    Budget, DestinationRecommendation, GenerationSettings, ModelMessage, RecommendationResponse,
    Role, TravelPreferences, TravelStyle, Usage,
};
