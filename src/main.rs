//! Roam CLI binary entry point.

use std::sync::Arc;

use clap::Parser;
use roam::agent_loop::{RunEvent, RunEventPayload};
use roam::cli::{Cli, Commands, RecommendArgs, ServeArgs};
use roam::config::AppConfig;
use roam::recommend::DestinationRecommender;
use roam::tools::travel::default_registry;
use roam::types::RecommendationResponse;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roam=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Recommend(args) => handle_recommend(cli.config, args).await,
        Commands::Tools => handle_tools(),
        Commands::Serve(args) => handle_serve(cli.config, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<std::path::PathBuf>) -> Result<AppConfig, roam::error::RoamError> {
    AppConfig::load(path.as_deref())
}

async fn handle_recommend(
    config_path: Option<std::path::PathBuf>,
    args: RecommendArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(model) = &args.model {
        config.model = model.clone();
    }

    let mut recommender = DestinationRecommender::from_config(&config)?;
    if args.verbose {
        recommender = recommender.with_event_sink(Arc::new(print_event));
    }

    let response = recommender.recommend(&args.preferences()).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

fn handle_tools() -> Result<(), Box<dyn std::error::Error>> {
    for def in default_registry()?.definitions() {
        println!("{:<26} {}", def.name, def.description);
    }
    Ok(())
}

async fn handle_serve(
    config_path: Option<std::path::PathBuf>,
    args: ServeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    roam::server::serve(config).await?;
    Ok(())
}

fn print_event(event: RunEvent) {
    match &event.payload {
        RunEventPayload::ToolCallStarted { call } => {
            eprintln!("-> {} {}", call.name, call.arguments);
        }
        RunEventPayload::ToolResult { result } if result.is_error => {
            eprintln!("   error: {}", result.result);
        }
        RunEventPayload::Completed { rounds } => {
            eprintln!("done after {rounds} tool round(s)");
        }
        RunEventPayload::Failed { error } => eprintln!("failed: {error}"),
        _ => {}
    }
}

fn print_response(response: &RecommendationResponse) {
    if let Some(error) = &response.error {
        eprintln!("No recommendations: {error}");
        return;
    }
    if response.destinations.is_empty() {
        println!("No destinations fit the budget.");
        return;
    }
    for (i, dest) in response.destinations.iter().enumerate() {
        println!("{}. {} ({}) - ₩{}", i + 1, dest.name, dest.country, dest.estimated_cost);
        println!("   flight ₩{}, stay ₩{}", dest.flight_cost, dest.accommodation_cost);
        println!("   {}", dest.reason);
        if !dest.highlights.is_empty() {
            println!("   highlights: {}", dest.highlights.join(", "));
        }
        println!("   best season: {}", dest.best_season);
        if let Some(weather) = &dest.weather {
            println!("   weather: {weather}");
        }
        for tip in &dest.tips {
            println!("   - {tip}");
        }
    }
    if response.total_count > response.destinations.len() {
        println!("({} of {} within budget shown)", response.destinations.len(), response.total_count);
    }
}
