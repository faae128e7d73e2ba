//! DineWise: maps-grounded restaurant recommendations
//!
//! Usage:
//!   dinewise                                   - Open the window
//!   dinewise search <location> <preference>    - One-shot search on stdout
//!   dinewise help                              - Show help

mod app;
mod backend;
mod commands;
mod config;
mod error;
mod geo;
mod search;
mod state;
mod ui;

use app::DineWise;
use backend::api::GeminiClient;
use commands::Command;
use config::Config;
use iced::{window, Size};
use search::{search_restaurants, MinRating, SearchOutcome, SearchQuery};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    match Command::parse(&args) {
        Command::Window => start_window(),
        Command::Search { location, preference, min_rating } => {
            run_search(location, preference, min_rating)
        }
        Command::Help => {
            println!("{}", Command::help_text());
            ExitCode::SUCCESS
        }
        Command::Invalid { message } => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    // try_init: tests and repeated calls must not panic
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config() -> Option<Config> {
    match Config::load() {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            None
        }
    }
}

fn start_window() -> ExitCode {
    let Some(config) = load_config() else {
        return ExitCode::FAILURE;
    };
    if config.api_key.is_none() {
        tracing::warn!("No API key configured; searches will fail until GEMINI_API_KEY is set");
    }

    tracing::info!("Starting DineWise window");

    let result = iced::application(DineWise::title, DineWise::update, DineWise::view)
        .subscription(DineWise::subscription)
        .theme(DineWise::theme)
        .window(window::Settings {
            size: Size::new(1180.0, 860.0),
            position: window::Position::Centered,
            min_size: Some(Size::new(760.0, 560.0)),
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || DineWise::new(config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Window error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_search(location: String, preference: String, min_rating: MinRating) -> ExitCode {
    let Some(config) = load_config() else {
        return ExitCode::FAILURE;
    };
    if let Err(e) = config.require_api_key() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: could not start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = GeminiClient::from_config(&config);
    let query = SearchQuery::new(location, preference, min_rating);
    match rt.block_on(search_restaurants(&client, &config.model, &query)) {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    println!("{}\n", outcome.text);

    if !outcome.sources.is_empty() {
        println!("Map sources:");
        for source in &outcome.sources {
            println!("  - {} <{}>", source.title, source.uri);
        }
        println!();
    }

    for card in &outcome.restaurants {
        println!("{}", card.name);
        println!("  {}", card.match_reason);
        for snippet in card.review_snippets.iter().take(ui::restaurant_card::MAX_SNIPPETS) {
            println!("  “{}”", snippet);
        }
        println!("  {}", card.map_url);
    }
}
