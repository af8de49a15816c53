//! `weather` widget.
//!
//! With an API key (the widget's `api_key` or `OPENWEATHER_API_KEY`) current
//! conditions come from OpenWeatherMap. Without one the widget produces
//! plausible sample conditions so a dashboard still renders.

use crate::http;
use async_trait::async_trait;
use chrono::Utc;
use gaze_kernel::{FetchContext, WidgetFetcher};
use gaze_types::data::WeatherData;
use gaze_types::widget::{WeatherConfig, WidgetKind};
use gaze_types::{FetchError, WidgetConfig, WidgetData};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Location used when the widget names none.
pub const DEFAULT_LOCATION: &str = "San Francisco";

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const SAMPLE_CONDITIONS: [&str; 5] = ["Sunny", "Partly Cloudy", "Cloudy", "Rainy", "Clear"];

/// Fetcher for `weather`.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: reqwest::Client,
}

impl WeatherFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Current-conditions request. The key is borrowed into the query
    /// without an intermediate copy.
    fn openweather_request(
        &self,
        config: &WeatherConfig,
        location: &str,
        api_key: &str,
    ) -> reqwest::RequestBuilder {
        let request = match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => self
                .client
                .get(OPENWEATHER_URL)
                .query(&[("lat", lat), ("lon", lon)]),
            _ => self.client.get(OPENWEATHER_URL).query(&[("q", location)]),
        };
        request.query(&[("units", "metric"), ("appid", api_key)])
    }

    async fn fetch_openweather(
        &self,
        config: &WeatherConfig,
        location: &str,
        api_key: &str,
    ) -> Result<WeatherData, FetchError> {
        // The query carries the key, so errors only name the endpoint.
        let request = self.openweather_request(config, location, api_key);
        let body: OpenWeatherResponse = http::send(request, OPENWEATHER_URL)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        let display_name = config.location.clone().unwrap_or(body.name);
        Ok(from_openweather(display_name, body.main, body.wind, body.weather))
    }
}

#[async_trait]
impl WidgetFetcher for WeatherFetcher {
    async fn fetch(
        &self,
        config: &WidgetConfig,
        _cx: &FetchContext<'_>,
    ) -> Result<WidgetData, FetchError> {
        let WidgetKind::Weather(weather) = &config.kind else {
            return Err(FetchError::InvalidConfig(format!(
                "expected a `weather` widget, got `{}`",
                config.type_name()
            )));
        };

        let location = weather
            .location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_LOCATION);

        let data = match resolve_api_key(weather) {
            Some(api_key) => {
                debug!(location, "Fetching weather from OpenWeatherMap");
                let data = self.fetch_openweather(weather, location, &api_key).await?;
                info!(
                    location,
                    temperature = data.temperature,
                    condition = %data.condition,
                    "Weather fetched"
                );
                data
            }
            None => {
                debug!(location, "No weather API key, using sample conditions");
                sample_weather(location)
            }
        };

        Ok(WidgetData::Weather(data))
    }
}

/// API key from the widget config, falling back to the environment.
fn resolve_api_key(config: &WeatherConfig) -> Option<Zeroizing<String>> {
    config
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .map(Zeroizing::new)
        .or_else(|| {
            std::env::var(API_KEY_ENV)
                .ok()
                .filter(|v| !v.is_empty())
                .map(Zeroizing::new)
        })
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    #[serde(default)]
    name: String,
    main: OpenWeatherMain,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
    wind: OpenWeatherWind,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    /// m/s
    speed: f64,
}

fn from_openweather(
    location: String,
    main: OpenWeatherMain,
    wind: OpenWeatherWind,
    weather: Vec<OpenWeatherCondition>,
) -> WeatherData {
    let (condition, icon) = weather
        .into_iter()
        .next()
        .map(|c| (c.description, c.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), None));

    WeatherData {
        location,
        temperature: main.temp,
        condition,
        humidity: main.humidity,
        wind_speed: wind.speed * 3.6,
        icon,
        last_updated: Utc::now(),
    }
}

/// Sample conditions: 5-34 °C, 40-79 % humidity, 5-29 km/h wind.
fn sample_weather(location: &str) -> WeatherData {
    let mut rng = rand::thread_rng();
    let condition = SAMPLE_CONDITIONS
        .choose(&mut rng)
        .copied()
        .unwrap_or("Clear");

    WeatherData {
        location: location.to_string(),
        temperature: f64::from(rng.gen_range(5..35_u32)),
        condition: condition.to_string(),
        humidity: f64::from(rng.gen_range(40..80_u32)),
        wind_speed: f64::from(rng.gen_range(5..30_u32)),
        icon: None,
        last_updated: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_weather_ranges() {
        for _ in 0..50 {
            let data = sample_weather("Oslo");
            assert_eq!(data.location, "Oslo");
            assert!((5.0..35.0).contains(&data.temperature));
            assert!((40.0..80.0).contains(&data.humidity));
            assert!((5.0..30.0).contains(&data.wind_speed));
            assert!(SAMPLE_CONDITIONS.contains(&data.condition.as_str()));
        }
    }

    #[test]
    fn test_openweather_conversion() {
        let body: OpenWeatherResponse = serde_json::from_value(serde_json::json!({
            "name": "Berlin",
            "main": { "temp": 12.5, "humidity": 71 },
            "weather": [{ "description": "light rain", "icon": "10d" }],
            "wind": { "speed": 5.0 }
        }))
        .unwrap();

        let data = from_openweather(body.name, body.main, body.wind, body.weather);
        assert_eq!(data.location, "Berlin");
        assert_eq!(data.temperature, 12.5);
        assert_eq!(data.condition, "light rain");
        assert_eq!(data.humidity, 71.0);
        assert!((data.wind_speed - 18.0).abs() < 1e-9);
        assert_eq!(data.icon.as_deref(), Some("10d"));
    }

    #[test]
    fn test_openweather_without_conditions() {
        let data = from_openweather(
            "Nowhere".to_string(),
            OpenWeatherMain {
                temp: 0.0,
                humidity: 0.0,
            },
            OpenWeatherWind { speed: 0.0 },
            Vec::new(),
        );
        assert_eq!(data.condition, "Unknown");
        assert!(data.icon.is_none());
    }

    #[test]
    fn test_config_api_key_takes_precedence() {
        let config = WeatherConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_api_key(&config).unwrap().as_str(), "from-config");
    }

    fn query_pairs(request: reqwest::RequestBuilder) -> Vec<(String, String)> {
        request
            .build()
            .unwrap()
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_openweather_request_by_location() {
        let fetcher = WeatherFetcher::new(reqwest::Client::new());
        let key = Zeroizing::new("secret-key".to_string());
        let pairs = query_pairs(fetcher.openweather_request(
            &WeatherConfig::default(),
            "Oslo",
            key.as_str(),
        ));
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Oslo".to_string()),
                ("units".to_string(), "metric".to_string()),
                ("appid".to_string(), "secret-key".to_string()),
            ]
        );
    }

    #[test]
    fn test_openweather_request_by_coordinates() {
        let fetcher = WeatherFetcher::new(reqwest::Client::new());
        let config = WeatherConfig {
            latitude: Some(59.9),
            longitude: Some(10.75),
            ..Default::default()
        };
        let pairs = query_pairs(fetcher.openweather_request(&config, "ignored", "k"));
        assert_eq!(pairs[0], ("lat".to_string(), "59.9".to_string()));
        assert_eq!(pairs[1], ("lon".to_string(), "10.75".to_string()));
        assert!(pairs.iter().all(|(k, _)| k != "q"));
        assert_eq!(pairs[3], ("appid".to_string(), "k".to_string()));
    }
}
