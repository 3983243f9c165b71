//! Core library for the `city-weather` client.
//!
//! This crate defines:
//! - Configuration handling
//! - Remote access to the cities and weather endpoints
//! - Mapping into domain models and the alphabetical city index
//! - Observable per-screen state holders
//!
//! It is used by `city-weather-cli`, but any front-end can drive the screen holders.

pub mod config;
pub mod error;
pub mod gateway;
pub mod index;
pub mod mapper;
pub mod model;
pub mod remote;
pub mod state;

use std::sync::Arc;

pub use config::Config;
pub use error::{GatewayError, GatewayResult};
pub use gateway::DataGateway;
pub use index::GroupedIndex;
pub use model::{City, CityResponse, CitySelection, Weather, WeatherResponse};
pub use remote::RemoteClient;
pub use state::{CitiesScreen, ScreenState, WeatherScreen};

/// Process-wide wiring, assembled once at startup and handed to each screen.
#[derive(Debug, Clone)]
pub struct Services {
    gateway: DataGateway,
    error_message: Arc<str>,
}

impl Services {
    /// Build the HTTP stack described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("city-weather/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let remote = remote::remote_from_config(config, http);
        Ok(Self::new(remote, config.error_message.clone()))
    }

    pub fn new(remote: Arc<dyn RemoteClient>, error_message: impl Into<String>) -> Self {
        Self {
            gateway: DataGateway::new(remote),
            error_message: Arc::from(error_message.into()),
        }
    }

    pub fn cities_screen(&self) -> CitiesScreen {
        CitiesScreen::new(self.gateway.clone(), &*self.error_message)
    }

    pub fn weather_screen(&self, selection: CitySelection) -> WeatherScreen {
        WeatherScreen::new(self.gateway.clone(), selection, &*self.error_message)
    }
}
