//! Command-line interface definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::types::{Budget, Companion, TravelPreferences, TravelStyle};

/// Roam travel destination recommender
#[derive(Parser, Debug)]
#[command(name = "roam", version, about = "Travel destination recommendations from a tool-calling agent")]
pub struct Cli {
    /// Config file (defaults to config.toml in the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend destinations for one trip
    Recommend(RecommendArgs),
    /// List the tools offered to the model
    Tools,
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Budget per person in KRW
    #[arg(long, conflicts_with = "undecided", required_unless_present = "undecided")]
    pub budget: Option<u64>,

    /// No budget limit
    #[arg(long)]
    pub undecided: bool,

    #[arg(long, default_value_t = 1)]
    pub people: u32,

    /// beach, culture, adventure, city or nature
    #[arg(long)]
    pub style: TravelStyle,

    #[arg(long)]
    pub companion: Option<Companion>,

    /// Free-form request passed to the model
    #[arg(long)]
    pub request: Option<String>,

    /// Model override (provider:model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,

    /// Show tool calls as they happen
    #[arg(short, long)]
    pub verbose: bool,
}

impl RecommendArgs {
    pub fn preferences(&self) -> TravelPreferences {
        TravelPreferences {
            start_date: self.start,
            end_date: self.end,
            budget: match self.budget {
                Some(amount) if !self.undecided => Budget::Fixed(amount),
                _ => Budget::Undecided,
            },
            number_of_people: self.people,
            companion: self.companion,
            travel_style: self.style,
            custom_request: self.request.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,
}
