//! Roam — travel destination recommendations from a tool-calling agent.
//!
//! A model is handed seven travel lookup tools (destination search, prices,
//! budget, weather, seasonal events) and loops through tool calls until it
//! answers. The answer is parsed into [`types::DestinationRecommendation`]s,
//! filtered against the traveller's budget, and capped at five.
//!
//! # Quick Start
//!
//! ```no_run
//! use roam::prelude::*;
//!
//! # async fn example() -> roam::error::Result<()> {
//! let config = AppConfig::load(None)?;
//! let recommender = DestinationRecommender::from_config(&config)?;
//! let prefs: TravelPreferences = serde_json::from_str(
//!     r#"{"startDate":"2024-08-01","endDate":"2024-08-07","budget":2000000,
//!         "numberOfPeople":2,"travelStyle":"beach"}"#,
//! )?;
//! let response = recommender.recommend(&prefs).await?;
//! for dest in &response.destinations {
//!     println!("{} ({})", dest.name, dest.estimated_cost);
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent_loop;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod recommend;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;
