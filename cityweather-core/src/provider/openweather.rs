use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;

use crate::{Config, WeatherSummary, error::LookupError};

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key(), config.base_url())
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, place: &str) -> Result<WeatherSummary, LookupError> {
        tracing::debug!(place, url = %self.base_url, "requesting current conditions");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", place),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(rejected(status, &body));
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        let summary = parsed.into_summary()?;

        tracing::debug!(place = %summary.place, country = %summary.country, "current conditions received");
        Ok(summary)
    }
}

/// Any non-2xx status is reported as "City not found".
fn rejected(status: StatusCode, body: &str) -> LookupError {
    tracing::warn!(status = status.as_u16(), "weather provider rejected request");
    tracing::debug!(body = %truncate_body(body), "rejected response body");

    LookupError::NotFound { status: status.as_u16() }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_summary(self) -> Result<WeatherSummary, LookupError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            LookupError::MalformedResponse(
                "OpenWeather response contained no weather conditions".to_string(),
            )
        })?;

        Ok(WeatherSummary {
            place: self.name,
            country: self.sys.country,
            description: condition.description,
            category: condition.main,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            observed_at: self.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
