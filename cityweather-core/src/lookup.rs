use crate::{WeatherSummary, error::LookupError, model::validate_query, provider::WeatherProvider};

/// Look up current conditions for a user-entered place name.
///
/// Blank input fails with [`LookupError::EmptyQuery`] without touching the provider.
/// Otherwise the trimmed name goes out in a single provider call.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    query: &str,
) -> Result<WeatherSummary, LookupError> {
    let place = validate_query(query)?;
    provider.current(place).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    pub(crate) fn sample_summary(place: &str) -> WeatherSummary {
        WeatherSummary {
            place: place.to_string(),
            country: "US".into(),
            description: "clear sky".into(),
            category: "Clear".into(),
            temperature_c: 25.4,
            feels_like_c: 26.1,
            humidity_pct: 60,
            wind_speed_mps: 2.5,
            observed_at: None,
        }
    }

    /// Answers from a fixed result and remembers what it was asked for.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingProvider {
        pub calls: AtomicUsize,
        pub places: Mutex<Vec<String>>,
        pub fail_with: Option<LookupError>,
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn current(&self, place: &str) -> Result<WeatherSummary, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.places.lock().unwrap().push(place.to_string());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(sample_summary(place)),
            }
        }
    }

    #[tokio::test]
    async fn blank_queries_make_no_call() {
        let provider = RecordingProvider::default();

        for query in ["", "   "] {
            let err = lookup(&provider, query).await.unwrap_err();
            assert_eq!(err, LookupError::EmptyQuery);
            assert_eq!(err.to_string(), "Please enter a city name");
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sends_the_trimmed_place_once() {
        let provider = RecordingProvider::default();

        let summary = lookup(&provider, "  Miami ").await.unwrap();
        assert_eq!(summary.place, "Miami");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*provider.places.lock().unwrap(), vec!["Miami".to_string()]);
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let provider = RecordingProvider {
            fail_with: Some(LookupError::NotFound { status: 404 }),
            ..Default::default()
        };

        let err = lookup(&provider, "Nonexistentville").await.unwrap_err();
        assert_eq!(err.to_string(), "City not found");
    }
}
