//! Single-shot access to the remote data, with every fault folded into [`GatewayError`].

use std::sync::Arc;

use crate::{
    error::{GatewayError, GatewayResult},
    mapper::{to_city, to_weather},
    model::{City, Weather},
    remote::RemoteClient,
};

#[derive(Debug, Clone)]
pub struct DataGateway {
    remote: Arc<dyn RemoteClient>,
}

impl DataGateway {
    pub fn new(remote: Arc<dyn RemoteClient>) -> Self {
        Self { remote }
    }

    /// Fetch and map the city catalog.
    ///
    /// An empty catalog is an error. Records with an empty name are dropped.
    pub async fn get_cities(&self) -> GatewayResult<Vec<City>> {
        let responses = self.remote.fetch_cities().await.map_err(|err| {
            tracing::warn!(error = %format!("{err:#}"), "city catalog fetch failed");
            GatewayError::from(err)
        })?;

        if responses.is_empty() {
            tracing::warn!("city catalog is empty");
            return Err(GatewayError::empty());
        }

        Ok(responses.into_iter().filter_map(to_city).collect())
    }

    pub async fn get_weather(&self, latitude: &str, longitude: &str) -> GatewayResult<Weather> {
        let response = self.remote.fetch_weather(latitude, longitude).await.map_err(|err| {
            tracing::warn!(
                %latitude,
                %longitude,
                error = %format!("{err:#}"),
                "weather fetch failed"
            );
            GatewayError::from(err)
        })?;

        Ok(to_weather(response))
    }
}
