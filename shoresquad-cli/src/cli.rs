use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};

use shoresquad_core::{
    App, Config, EventsClient, EventsStore, ForecastDay, IpPositionSource, StaticSurfaces,
    Surfaces, WeatherClient, classify, geo,
};

/// Top-level page sections, in document order.
const PAGE_SECTIONS: &[&str] = &["hero", "map", "weather", "events"];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "shoresquad", version, about = "Beach cleanup crew coordinator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and endpoints.
    Configure {
        /// What to configure: "weather", "maps" or "backend".
        target: String,
    },

    /// Resolve your location and assemble the full page: map, forecast, events.
    Run {
        /// Emit the rendered card markup instead of a plain summary.
        #[arg(long)]
        html: bool,
    },

    /// Show the 3-day forecast with beach-cleanup suitability.
    Forecast {
        /// Emit the rendered card markup instead of a plain summary.
        #[arg(long)]
        html: bool,
    },

    /// List or join cleanup events.
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List upcoming cleanup events.
    List,

    /// Join a cleanup event by id.
    Join {
        /// Event id, as shown by `events list`.
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { target } => configure(&target),
            Command::Run { html } => run_app(html).await,
            Command::Forecast { html } => forecast(html).await,
            Command::Events { action } => match action {
                EventsAction::List => list_events().await,
                EventsAction::Join { id } => join_event(&id).await,
            },
        }
    }
}

fn configure(target: &str) -> Result<()> {
    let mut config = Config::load()?;

    match target {
        "weather" => {
            let key = Password::new("WeatherAPI.com API key:")
                .without_confirmation()
                .prompt()
                .context("Failed to read the API key")?;
            config.set_weather_api_key(key);
        }
        "maps" => {
            let key = Password::new("Map provider API key:")
                .without_confirmation()
                .prompt()
                .context("Failed to read the API key")?;
            config.set_maps_api_key(key);
        }
        "backend" => {
            let url = Text::new("Events backend base URL:")
                .prompt()
                .context("Failed to read the backend URL")?;
            config.set_backend_url(url);
        }
        other => {
            bail!("Unknown configure target '{other}'. Supported targets: weather, maps, backend.")
        }
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn build_app(config: &Config) -> Result<App> {
    let weather_client = WeatherClient::new(config.weather_api_key()?.to_string());
    let events_client = EventsClient::new(config.backend_url()?);
    let surfaces = Surfaces::probe(&StaticSurfaces::full(PAGE_SECTIONS));

    Ok(App::new(
        surfaces,
        Box::new(IpPositionSource::new()),
        weather_client,
        events_client,
        config.maps_api_key.clone(),
    ))
}

async fn run_app(html: bool) -> Result<()> {
    let config = Config::load()?;
    let mut app = build_app(&config)?;

    app.start().await;

    println!("Location: {}", app.location());

    if let Some(map) = app.map() {
        println!("Map: {}", map.embed_url());
    }

    if html {
        if let Some(markup) = app.weather_markup() {
            println!("{markup}");
        }
        if let Some(markup) = app.events_markup() {
            println!("{markup}");
        }
    } else {
        if let Some(days) = app.forecast() {
            println!("\nForecast:");
            for day in days {
                println!("  {}", day_line(day));
            }
        }

        if !app.events().is_empty() {
            println!("\nCleanup events:");
            for event in app.events().as_slice() {
                let joined = if event.joined { " [joined]" } else { "" };
                println!("  {}  {}  {}{}", event.id, event.date, event.title, joined);
            }
        }
    }

    for message in app.toasts().messages() {
        eprintln!("! {message}");
    }

    Ok(())
}

async fn forecast(html: bool) -> Result<()> {
    let config = Config::load()?;
    let client = WeatherClient::new(config.weather_api_key()?.to_string());

    let location = geo::resolve(&IpPositionSource::new()).await;
    let days = client.forecast(location).await?;

    println!("Forecast for {location} as of {}:", chrono::Local::now().format("%a %d %b"));
    if html {
        println!("{}", shoresquad_core::render::weather_cards(&days));
    } else {
        for day in &days {
            println!("  {}", day_line(day));
        }
    }

    Ok(())
}

async fn list_events() -> Result<()> {
    let config = Config::load()?;
    let client = EventsClient::new(config.backend_url()?);

    let events = client.fetch_events().await?;
    if events.is_empty() {
        println!("No upcoming cleanup events.");
        return Ok(());
    }

    for event in &events {
        println!("{}  {}  {}", event.id, event.date, event.title);
        println!("    {} ({})", event.description, event.location);
    }

    Ok(())
}

async fn join_event(id: &str) -> Result<()> {
    let config = Config::load()?;
    let client = EventsClient::new(config.backend_url()?);

    let mut store = EventsStore::new();
    store.load(&client).await?;
    store.join(&client, id).await?;

    if let Some(event) = store.get(id) {
        println!("Joined: {} on {}", event.title, event.date);
    }

    Ok(())
}

fn day_line(day: &ForecastDay) -> String {
    format!(
        "{}  {:.0}°/{:.0}°  wind {:.0} km/h  precip {}mm  {}",
        day.date.format("%a"),
        day.max_temp_c.round(),
        day.min_temp_c.round(),
        day.max_wind_kph.round(),
        day.total_precip_mm,
        classify(day),
    )
}
