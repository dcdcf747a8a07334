use crate::{Config, WeatherSummary, error::LookupError, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// A source of current conditions for a place name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for an already-validated place name.
    /// Implementations make exactly one request and never retry.
    async fn current(&self, place: &str) -> Result<WeatherSummary, LookupError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Arc<P> {
    async fn current(&self, place: &str) -> Result<WeatherSummary, LookupError> {
        (**self).current(place).await
    }
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::from_config(config))
}
