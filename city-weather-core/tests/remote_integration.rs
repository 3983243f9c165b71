//! Integration tests for the HTTP remote, gateway and screen holders using wiremock.

use city_weather_core::{
    CitySelection, Config, DataGateway, ScreenState, Services, Weather, remote::remote_from_config,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXED: &str = "Не удалось загрузить данные";

fn config_for(server: &MockServer) -> Config {
    Config {
        api_key: Some("TEST_KEY".into()),
        cities_url: format!("{}/cities.json", server.uri()),
        weather_url: format!("{}/data/2.5/weather", server.uri()),
        error_message: FIXED.into(),
    }
}

fn gateway_for(server: &MockServer) -> DataGateway {
    DataGateway::new(remote_from_config(&config_for(server), reqwest::Client::new()))
}

fn cities_body() -> String {
    serde_json::json!([
        {"city": "Заринск", "id": "1", "latitude": "53.70", "longitude": "84.93"},
        {"city": "", "id": "2", "latitude": "0", "longitude": "0"},
        {"city": "Зея", "id": "3", "latitude": "53.73", "longitude": "127.26"},
        {"city": "Абакан", "id": "4", "latitude": "53.72", "longitude": "91.43"}
    ])
    .to_string()
}

async fn mount_cities(server: &MockServer, body: String) {
    // the real endpoint is a gist served as text/plain
    Mock::given(method("GET"))
        .and(path("/cities.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain; charset=utf-8"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_cities_plain_text_body_is_parsed() {
    let server = MockServer::start().await;
    mount_cities(&server, cities_body()).await;

    let cities = gateway_for(&server).get_cities().await.unwrap();

    let names: Vec<&str> = cities.iter().map(|c| c.city_name.as_str()).collect();
    assert_eq!(names, ["Заринск", "Зея", "Абакан"]);
    assert_eq!(cities[2].first_char, 'А');
}

#[tokio::test]
async fn test_cities_empty_array_is_error() {
    let server = MockServer::start().await;
    mount_cities(&server, "[]".into()).await;

    let result = gateway_for(&server).get_cities().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cities_server_error_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = gateway_for(&server).get_cities().await.unwrap_err();
    let message = err.message().unwrap_or_default();
    assert!(message.contains("503"));
    assert!(message.contains("upstream unavailable"));
}

#[tokio::test]
async fn test_cities_malformed_json_is_error() {
    let server = MockServer::start().await;
    mount_cities(&server, r#"[{"city": "Зея"}"#.into()).await;

    let err = gateway_for(&server).get_cities().await.unwrap_err();
    let message = err.message().unwrap_or_default();
    assert!(message.contains("Failed to parse cities JSON"));
}

#[tokio::test]
async fn test_weather_request_carries_all_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "55.75"))
        .and(query_param("lon", "37.61"))
        .and(query_param("units", "metric"))
        .and(query_param("exclude", "minutely,hourly,daily,alerts"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": {"lon": 37.61, "lat": 55.75},
            "id": 1,
            "main": {"temp": 23.4, "feels_like": 22.9},
            "name": "Москва"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let weather = gateway_for(&server).get_weather("55.75", "37.61").await.unwrap();

    assert_eq!(
        weather,
        Weather {
            id: 1,
            temperature: "23°C".into(),
            name: "Москва".into(),
        }
    );
}

#[tokio::test]
async fn test_cities_screen_end_to_end() {
    let server = MockServer::start().await;
    mount_cities(&server, cities_body()).await;

    let services = Services::from_config(&config_for(&server)).unwrap();
    let screen = services.cities_screen();
    screen.refresh().await;

    let state = screen.current();
    let index = state.success().expect("catalog should load");
    let names: Vec<&str> = index
        .sorted_cities()
        .iter()
        .map(|c| c.city_name.as_str())
        .collect();
    assert_eq!(names, ["Абакан", "Заринск", "Зея"]);
    assert_eq!(index.start_indexes(), [0, 1]);
    assert_eq!(index.end_indexes(), [1, 3]);
}

#[tokio::test]
async fn test_weather_screen_unauthorized_shows_fixed_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let services = Services::from_config(&config_for(&server)).unwrap();
    let screen = services.weather_screen(CitySelection {
        latitude: "55.75".into(),
        longitude: "37.61".into(),
        city_name: "Москва".into(),
    });
    screen.refresh().await;

    assert_eq!(screen.current(), ScreenState::Error(FIXED.into()));
}
