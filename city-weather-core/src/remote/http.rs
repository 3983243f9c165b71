use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::missing_api_key,
    model::{CityResponse, WeatherResponse},
};

use super::RemoteClient;

/// Forecast sections the current-weather call has no use for.
const EXCLUDED_PARTS: &str = "minutely,hourly,daily,alerts";

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub cities_url: String,
    pub weather_url: String,
}

#[derive(Debug, Clone)]
pub struct HttpRemoteClient {
    http: Client,
    endpoints: Endpoints,
    api_key: Option<String>,
}

impl HttpRemoteClient {
    pub fn new(http: Client, endpoints: Endpoints, api_key: Option<String>) -> Self {
        Self {
            http,
            endpoints,
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(missing_api_key)
    }

    /// Send `request` and decode the body as JSON whatever its content type.
    ///
    /// The cities gist is served as `text/plain`, so `Response::json` can't be used.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let res = request
            .send()
            .await
            .with_context(|| format!("Failed to send {what} request"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "{what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse {what} JSON"))
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn fetch_cities(&self) -> Result<Vec<CityResponse>> {
        tracing::debug!(url = %self.endpoints.cities_url, "fetching city catalog");

        let request = self.http.get(&self.endpoints.cities_url);
        let cities: Vec<CityResponse> = self.get_json(request, "cities").await?;

        tracing::debug!(count = cities.len(), "city catalog received");
        Ok(cities)
    }

    async fn fetch_weather(&self, latitude: &str, longitude: &str) -> Result<WeatherResponse> {
        let api_key = self.api_key()?;
        tracing::debug!(%latitude, %longitude, "fetching current weather");

        let request = self.http.get(&self.endpoints.weather_url).query(&[
            ("lat", latitude),
            ("lon", longitude),
            ("units", "metric"),
            ("exclude", EXCLUDED_PARTS),
            ("appid", api_key),
        ]);

        self.get_json(request, "weather").await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
