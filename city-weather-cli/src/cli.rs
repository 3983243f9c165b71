use std::{fmt, io::IsTerminal};

use anyhow::{Context, anyhow};
use city_weather_core::{City, CitySelection, Config, GroupedIndex, ScreenState, Services};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Select, Text};
use tokio::sync::watch;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "city-weather", version, about = "City list and current weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and optional endpoint overrides.
    Configure,

    /// List cities grouped by first letter.
    Cities {
        /// Only show the group for this letter.
        #[arg(long, conflicts_with = "from")]
        letter: Option<char>,

        /// Start the listing at this row of the sorted list.
        #[arg(long)]
        from: Option<usize>,
    },

    /// Show current weather for a city from the catalog, or for raw coordinates.
    Weather {
        /// City name as listed by `cities`.
        #[arg(required_unless_present_all = ["lat", "lon"])]
        city: Option<String>,

        #[arg(long, requires = "lon", conflicts_with = "city")]
        lat: Option<String>,

        #[arg(long, requires = "lat", conflicts_with = "city")]
        lon: Option<String>,

        /// Display name used with --lat/--lon.
        #[arg(long)]
        name: Option<String>,
    },

    /// Pick a letter, then a city, then show its weather.
    Browse,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Cities { letter, from } => {
                let services = Services::from_config(&Config::load()?)?;
                let index = load_cities(&services).await?;
                for line in index_lines(&index, letter, from.unwrap_or(0))? {
                    println!("{line}");
                }
                Ok(())
            }
            Command::Weather {
                city,
                lat,
                lon,
                name,
            } => {
                let config = Config::load()?;
                config.require_api_key()?;
                let services = Services::from_config(&config)?;

                let selection = match (city, lat, lon) {
                    (Some(city), _, _) => {
                        let index = load_cities(&services).await?;
                        find_city(&index, &city)?.selection()
                    }
                    (None, Some(latitude), Some(longitude)) => {
                        let city_name = name.unwrap_or_else(|| format!("{latitude}, {longitude}"));
                        CitySelection {
                            latitude,
                            longitude,
                            city_name,
                        }
                    }
                    _ => return Err(anyhow!("Either a city name or --lat and --lon is required")),
                };

                show_weather(&services, selection).await
            }
            Command::Browse => {
                let config = Config::load()?;
                config.require_api_key()?;
                let services = Services::from_config(&config)?;

                let index = load_cities(&services).await?;
                let selection = pick_city(&index)?;
                show_weather(&services, selection).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("API key prompt was cancelled")?;
    config.set_api_key(api_key.trim().to_string());

    if Confirm::new("Override endpoints or error message?").with_default(false).prompt()? {
        config.cities_url = Text::new("Cities URL:").with_default(&config.cities_url).prompt()?;
        config.weather_url = Text::new("Weather URL:").with_default(&config.weather_url).prompt()?;
        config.error_message =
            Text::new("Error message:").with_default(&config.error_message).prompt()?;
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// Ask whether to fetch again. Never retries without a terminal to ask on.
fn offer_retry(message: &str) -> anyhow::Result<bool> {
    eprintln!("{message}");

    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    Ok(Confirm::new("Retry?").with_default(true).prompt()?)
}

/// Trigger a fetch and wait for the screen to settle, offering a retry on error.
async fn drive<T: Clone>(
    mut rx: watch::Receiver<ScreenState<T>>,
    launch: impl Fn(),
) -> anyhow::Result<T> {
    loop {
        launch();
        let state = rx
            .wait_for(|s| !s.is_loading())
            .await
            .context("screen state closed")?
            .clone();

        match state.into_result() {
            Some(Ok(value)) => return Ok(value),
            Some(Err(message)) => {
                if !offer_retry(&message)? {
                    return Err(anyhow!(message));
                }
            }
            None => {}
        }
    }
}

async fn load_cities(services: &Services) -> anyhow::Result<GroupedIndex> {
    let screen = services.cities_screen();
    drive(screen.subscribe(), || {
        screen.launch();
    })
    .await
}

async fn show_weather(services: &Services, selection: CitySelection) -> anyhow::Result<()> {
    let screen = services.weather_screen(selection);
    let weather = drive(screen.subscribe(), || {
        screen.launch();
    })
    .await?;

    println!("{}: {}", screen.selection().city_name, weather.temperature);
    if weather.name != screen.selection().city_name {
        println!("  station: {}", weather.name);
    }
    println!("  updated {}", chrono::Local::now().format("%H:%M"));
    Ok(())
}

fn header_line(letter: char) -> String {
    format!("── {letter} ──")
}

/// Render the list the way a scrolled view shows it.
///
/// The row at `from` is preceded by its pinned header; later groups get a header
/// where they start.
fn index_lines(
    index: &GroupedIndex,
    letter: Option<char>,
    from: usize,
) -> anyhow::Result<Vec<String>> {
    if let Some(letter) = letter {
        let cities = index
            .group(letter)
            .ok_or_else(|| anyhow!("No cities starting with '{letter}'"))?;

        let mut lines = vec![header_line(letter)];
        lines.extend(cities.iter().map(|c| format!("  {}", c.city_name)));
        return Ok(lines);
    }

    let pinned = index.header_at(from).ok_or_else(|| {
        anyhow!("Row {from} is past the end of the list ({} cities)", index.len())
    })?;

    let mut lines = vec![header_line(pinned)];
    for (position, city) in index.sorted_cities().iter().enumerate().skip(from) {
        if position > from && index.start_indexes().contains(&position) {
            lines.push(header_line(city.first_char));
        }
        lines.push(format!("  {}", city.city_name));
    }

    lines.push(String::new());
    lines.push(format!("{} cities in {} groups", index.len(), index.group_count()));
    Ok(lines)
}

fn find_city<'a>(index: &'a GroupedIndex, name: &str) -> anyhow::Result<&'a City> {
    let wanted = name.trim().to_lowercase();
    let matches: Vec<&City> = index
        .sorted_cities()
        .iter()
        .filter(|c| c.city_name.to_lowercase() == wanted)
        .collect();

    match matches.len() {
        0 => Err(anyhow!("City '{name}' is not in the catalog")),
        1 => Ok(matches[0]),
        _ if std::io::stdin().is_terminal() => {
            let choices: Vec<CityChoice> = matches.into_iter().map(CityChoice).collect();
            Ok(Select::new("Several cities match, pick one:", choices).prompt()?.0)
        }
        _ => {
            tracing::warn!(city = %name, "ambiguous city name, using the first match");
            Ok(matches[0])
        }
    }
}

fn pick_city(index: &GroupedIndex) -> anyhow::Result<CitySelection> {
    let letter = Select::new("Letter:", index.letters().to_vec()).prompt()?;
    let cities = index.group(letter).unwrap_or_default();

    let choices: Vec<CityChoice> = cities.iter().map(CityChoice).collect();
    let choice = Select::new("City:", choices).with_page_size(15).prompt()?;
    Ok(choice.0.selection())
}

struct CityChoice<'a>(&'a City);

impl fmt::Display for CityChoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.0.city_name, self.0.latitude, self.0.longitude)
    }
}
