use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use tracing::error;

use clima_core::model::{self, HOURLY_SLOTS};
use clima_core::{
    Config, Coordinates, FetchState, IpLocationSource, LocationSource, OpenWeatherClient, Screen,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Clima en tu terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current weather at your location.
    Now,

    /// Current weather for a city name.
    Search {
        /// City name, e.g. "Ciudad de México".
        city: String,
    },

    /// One card per day of the 5-day forecast.
    Forecast,

    /// The next twelve 3-hour slots (~36 hours).
    Hourly,

    /// Store the API key and grant or revoke the location lookup.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Now => now().await,
            Command::Search { city } => search(&city).await,
            Command::Forecast => forecast().await,
            Command::Hourly => hourly().await,
            Command::Configure => configure(),
        }
    }
}

fn client_from_config(config: &Config) -> Result<OpenWeatherClient> {
    let api_key = config.resolved_api_key()?;
    Ok(OpenWeatherClient::new(api_key)?)
}

async fn now() -> Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let location = IpLocationSource::new(config.allow_ip_location)?;

    println!("{}", render::LOADING_WEATHER);

    let mut screen = Screen::new();
    let outcome = screen
        .run_cycle(location.current_fix().await, |at: Coordinates| client.current_by_coords(at))
        .await;

    if let Err(alert) = outcome {
        println!("{}", render::location_alert(&alert));
        return Ok(());
    }

    match screen.state() {
        FetchState::Loaded(report) => println!("{}", render::current_card(report)),
        FetchState::Failed(err) => {
            error!(error = %err, "current weather fetch failed");
            println!("{}", render::ERROR_WEATHER);
        }
        FetchState::NotLoaded | FetchState::Loading => {}
    }

    Ok(())
}

async fn search(raw: &str) -> Result<()> {
    let Some(city) = model::city_query(raw) else {
        println!("{}", render::EMPTY_QUERY);
        return Ok(());
    };

    let config = Config::load()?;
    let client = client_from_config(&config)?;

    println!("{}", render::LOADING_WEATHER);

    let mut screen = Screen::new();
    let ticket = screen.begin();
    let result = client.current_by_city(&city).await;
    screen.complete(ticket, result);

    match screen.state() {
        FetchState::Loaded(report) => println!("{}", render::current_card(report)),
        FetchState::Failed(err) => {
            // The taxonomy tells a 404 from a transport failure; the
            // user-facing copy keeps the app's single message.
            error!(error = %err, %city, "city search failed");
            println!("{}", render::CITY_NOT_FOUND);
        }
        FetchState::NotLoaded | FetchState::Loading => {}
    }

    Ok(())
}

async fn forecast() -> Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let location = IpLocationSource::new(config.allow_ip_location)?;

    println!("{}", render::LOADING_FORECAST);

    let mut screen = Screen::new();
    let outcome = screen
        .run_cycle(location.current_fix().await, |at: Coordinates| client.forecast_by_coords(at))
        .await;

    if let Err(alert) = outcome {
        println!("{}", render::location_alert(&alert));
        return Ok(());
    }

    match screen.state() {
        FetchState::Loaded(report) => {
            for slot in report.daily_at_noon() {
                println!("{}\n", render::forecast_card(slot));
            }
        }
        FetchState::Failed(err) => {
            error!(error = %err, "forecast fetch failed");
            println!("{}", render::ERROR_FORECAST);
        }
        FetchState::NotLoaded | FetchState::Loading => {}
    }

    Ok(())
}

async fn hourly() -> Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let location = IpLocationSource::new(config.allow_ip_location)?;

    println!("{}", render::LOADING_HOURLY);

    let mut screen = Screen::new();
    let outcome = screen
        .run_cycle(location.current_fix().await, |at: Coordinates| client.forecast_by_coords(at))
        .await;

    if let Err(alert) = outcome {
        println!("{}", render::location_alert(&alert));
        return Ok(());
    }

    match screen.state() {
        FetchState::Loaded(report) => {
            println!("{}", render::HOURLY_TITLE);
            for slot in report.upcoming(HOURLY_SLOTS) {
                println!("{}", render::hourly_card(slot));
            }
        }
        FetchState::Failed(err) => {
            error!(error = %err, "hourly forecast fetch failed");
            println!("{}", render::ERROR_HOURLY);
        }
        FetchState::NotLoaded | FetchState::Loading => {}
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let key = Text::new("API key de OpenWeather:")
        .with_help_message("Vacío conserva la clave actual")
        .prompt()?;
    let key = key.trim();
    if !key.is_empty() {
        config.api_key = Some(key.to_string());
    }

    config.allow_ip_location = Confirm::new("¿Permitir ubicación aproximada por IP?")
        .with_default(config.allow_ip_location)
        .prompt()?;

    config.save()?;
    println!("Configuración guardada en {}", Config::config_file_path()?.display());

    Ok(())
}
