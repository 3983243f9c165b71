//! Conversions from endpoint records into domain models.

use crate::model::{City, CityResponse, Weather, WeatherResponse};

/// Map a catalog record into a [`City`].
///
/// Returns `None` for a record with an empty name, which has no first letter.
pub fn to_city(response: CityResponse) -> Option<City> {
    let first_char = response.city_name.chars().next()?;

    Some(City {
        city_name: response.city_name,
        first_char,
        id: response.id,
        latitude: response.latitude,
        longitude: response.longitude,
    })
}

/// Map a current-weather body into a [`Weather`].
pub fn to_weather(response: WeatherResponse) -> Weather {
    Weather {
        id: response.id,
        temperature: format_celsius(response.main.temp),
        name: response.name,
    }
}

/// Round half away from zero and append the unit, e.g. `22.5 -> "23°C"`.
pub fn format_celsius(temp: f64) -> String {
    // `as i64` folds -0.0 into 0
    let rounded = temp.round() as i64;
    format!("{rounded}°C")
}
