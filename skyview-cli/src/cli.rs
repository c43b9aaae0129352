use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use skyview_core::{Config, Dashboard, OpenWeatherClient, SuggestionSession, Units};

use crate::render;

/// City fetched when neither the command line nor the config names one.
const FALLBACK_CITY: &str = "Manila";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "City weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display preferences.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,
    },

    /// Print geocoding suggestions for a partial city name.
    Suggest {
        /// Partial input, at least two characters.
        query: String,
    },

    /// Pick one of the suggestions for a query and show its weather.
    Pick {
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Suggest { query } => suggest(&query).await,
            Command::Pick { query } => pick(&query).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key);

    config.units = Select::new("Units:", vec![Units::Metric, Units::Imperial]).prompt()?;

    let default_city = Text::new("Default city (blank for none):").prompt()?;
    let default_city = default_city.trim();
    config.default_city = (!default_city.is_empty()).then(|| default_city.to_string());

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn dashboard_from(config: &Config) -> Result<Dashboard> {
    let api_key = config.require_api_key()?;
    let client = OpenWeatherClient::new(api_key.to_owned(), config.units);
    Ok(Dashboard::new(client))
}

async fn show(city: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let dashboard = dashboard_from(&config)?;

    let city = city
        .or_else(|| config.default_city.clone())
        .unwrap_or_else(|| FALLBACK_CITY.to_string());

    let report = dashboard.search_city(&city).await?;
    render::report(&report, config.units);
    Ok(())
}

async fn suggest(query: &str) -> Result<()> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?;
    let session = SuggestionSession::new(OpenWeatherClient::new(api_key.to_owned(), config.units));

    // a one-shot submit is never superseded
    let candidates = session.submit(query).await.unwrap_or_default();
    if candidates.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    for candidate in &candidates {
        println!(
            "{}  ({:.4}, {:.4})",
            candidate.label(),
            candidate.lat,
            candidate.lon
        );
    }
    Ok(())
}

async fn pick(query: &str) -> Result<()> {
    let config = Config::load()?;
    let dashboard = dashboard_from(&config)?;
    let session = SuggestionSession::new(dashboard.client().clone());

    let candidates = session.submit(query).await.unwrap_or_default();
    if candidates.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    let labels: Vec<String> = candidates.iter().map(|c| c.label()).collect();
    let choice = Select::new("Location:", labels).raw_prompt()?;
    let place = &candidates[choice.index];

    let report = dashboard
        .fetch_report(place.lat, place.lon, place.label())
        .await?;
    render::report(&report, config.units);
    Ok(())
}
