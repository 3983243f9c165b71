use serde::{Deserialize, Serialize};

/// A city from the catalog.
///
/// `first_char` is always the first character of `city_name`, case preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_name: String,
    pub first_char: char,
    pub id: String,
    pub latitude: String,
    pub longitude: String,
}

impl City {
    /// Arguments handed to the weather screen when this city is picked.
    pub fn selection(&self) -> CitySelection {
        CitySelection {
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            city_name: self.city_name.clone(),
        }
    }
}

/// Current weather for a location, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    pub id: i64,
    /// Rounded Celsius reading, e.g. `"23°C"`.
    pub temperature: String,
    pub name: String,
}

/// Navigation arguments passed from the cities list to the weather screen.
///
/// Coordinates are opaque strings and are forwarded to the endpoint as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySelection {
    pub latitude: String,
    pub longitude: String,
    pub city_name: String,
}

/// One record of the cities endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityResponse {
    #[serde(rename = "city")]
    pub city_name: String,
    pub id: String,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReading {
    pub temp: f64,
}

/// Body of the current-weather endpoint. Only the fields we display are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub id: i64,
    pub main: MainReading,
    pub name: String,
}
