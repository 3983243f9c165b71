use crate::{
    Config,
    model::{CityResponse, WeatherResponse},
    remote::http::{Endpoints, HttpRemoteClient},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};

pub mod http;

/// Raw access to the two endpoints. Implementations do no mapping or filtering.
#[async_trait]
pub trait RemoteClient: Send + Sync + Debug {
    async fn fetch_cities(&self) -> anyhow::Result<Vec<CityResponse>>;

    async fn fetch_weather(&self, latitude: &str, longitude: &str)
    -> anyhow::Result<WeatherResponse>;
}

/// Construct the HTTP client from config, sharing the given `reqwest::Client`.
pub fn remote_from_config(config: &Config, http: Client) -> Arc<dyn RemoteClient> {
    let endpoints = Endpoints {
        cities_url: config.cities_url.clone(),
        weather_url: config.weather_url.clone(),
    };

    Arc::new(HttpRemoteClient::new(http, endpoints, config.api_key.clone()))
}
