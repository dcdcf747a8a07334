use tokio::sync::watch;

use crate::{
    WeatherSummary,
    error::LookupError,
    provider::WeatherProvider,
    state::{Effect, Event, LookupState},
};

/// Result of [`WeatherSession::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A lookup was already in flight; nothing changed.
    Ignored,
    /// The submission ran to completion; this is the snapshot it left behind.
    Settled(LookupState),
}

/// Drives the lookup reducer against a provider and publishes every snapshot.
///
/// Snapshots are swapped whole through a `watch` channel, so observers never see a
/// half-applied transition.
#[derive(Debug)]
pub struct WeatherSession {
    provider: Box<dyn WeatherProvider>,
    state: watch::Sender<LookupState>,
}

impl WeatherSession {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        let (state, _) = watch::channel(LookupState::default());
        Self { provider, state }
    }

    /// Current snapshot.
    pub fn state(&self) -> LookupState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    pub async fn submit(&self, query: impl Into<String>) -> Submission {
        let transition = self.dispatch(Event::Submit(query.into()));

        let Some(Effect::Fetch { place }) = transition.effect else {
            if transition.was_loading {
                tracing::debug!("lookup already in flight, submission ignored");
                return Submission::Ignored;
            }
            return Submission::Settled(transition.state);
        };

        tracing::debug!(%place, "lookup dispatched");
        let in_flight = InFlight { session: self, settled: false };

        let result = self.provider.current(&place).await;
        match &result {
            Ok(summary) => tracing::info!(place = %summary.location_label(), "lookup succeeded"),
            Err(err) => tracing::info!(%place, error = %err, "lookup failed"),
        }

        Submission::Settled(in_flight.settle(result))
    }

    /// Apply one event atomically.
    fn dispatch(&self, event: Event) -> Transition {
        let mut transition = None;
        self.state.send_if_modified(|current| {
            let was_loading = current.loading;
            let (next, effect) = current.apply(event);
            let changed = next != *current;
            if changed {
                *current = next.clone();
            }
            transition = Some(Transition { was_loading, state: next, effect });
            changed
        });
        transition.unwrap_or_else(|| Transition {
            was_loading: false,
            state: self.state(),
            effect: None,
        })
    }
}

struct Transition {
    was_loading: bool,
    state: LookupState,
    effect: Option<Effect>,
}

/// Settles the pending lookup as cancelled if `submit` is dropped mid-call.
struct InFlight<'a> {
    session: &'a WeatherSession,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, result: Result<WeatherSummary, LookupError>) -> LookupState {
        self.settled = true;
        self.session.dispatch(Event::Settled(result)).state
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("lookup dropped before settling");
            self.session.dispatch(Event::Settled(Err(LookupError::Cancelled)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lookup::tests::{RecordingProvider, sample_summary},
        state::Panel,
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use std::time::Duration;
    use tokio::sync::{Notify, Semaphore};

    /// Never answers for "Miami"; answers immediately for anything else.
    #[derive(Debug, Default)]
    struct StuckOnMiami;

    #[async_trait]
    impl WeatherProvider for StuckOnMiami {
        async fn current(&self, place: &str) -> Result<WeatherSummary, LookupError> {
            if place == "Miami" {
                std::future::pending::<()>().await;
            }
            Ok(sample_summary(place))
        }
    }

    /// Blocks every call until the test releases it.
    #[derive(Debug)]
    struct GatedProvider {
        entered: Notify,
        release: Semaphore,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for GatedProvider {
        async fn current(&self, place: &str) -> Result<WeatherSummary, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release
                .acquire()
                .await
                .map_err(|e| LookupError::Transport(e.to_string()))?
                .forget();
            if place == "Nonexistentville" {
                return Err(LookupError::NotFound { status: 404 });
            }
            Ok(sample_summary(place))
        }
    }

    fn gated() -> (Arc<GatedProvider>, Arc<WeatherSession>) {
        let provider = Arc::new(GatedProvider {
            entered: Notify::new(),
            release: Semaphore::new(0),
            calls: AtomicUsize::new(0),
        });
        let session = Arc::new(WeatherSession::new(Box::new(provider.clone())));
        (provider, session)
    }

    #[tokio::test]
    async fn blank_submit_settles_immediately_without_a_call() {
        let provider = Arc::new(RecordingProvider::default());
        let session = WeatherSession::new(Box::new(provider.clone()));

        let Submission::Settled(state) = session.submit("   ").await else {
            panic!("blank submission should settle");
        };
        assert_eq!(state.error(), Some(&LookupError::EmptyQuery));
        assert!(!state.loading);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn loading_brackets_a_successful_call() {
        let (provider, session) = gated();
        let mut rx = session.subscribe();

        let task = tokio::spawn({
            let session = session.clone();
            async move { session.submit("Miami").await }
        });

        provider.entered.notified().await;
        assert!(session.state().loading);
        assert_eq!(session.state().panel(), Panel::Loading);

        provider.release.add_permits(1);
        let Submission::Settled(state) = task.await.unwrap() else {
            panic!("submission should settle");
        };

        assert!(!state.loading);
        assert_eq!(state.summary().map(|s| s.place.as_str()), Some("Miami"));
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().loading);
    }

    #[tokio::test]
    async fn loading_brackets_a_failing_call() {
        let (provider, session) = gated();

        let task = tokio::spawn({
            let session = session.clone();
            async move { session.submit("Nonexistentville").await }
        });

        provider.entered.notified().await;
        assert!(session.state().loading);

        provider.release.add_permits(1);
        task.await.unwrap();

        let state = session.state();
        assert!(!state.loading);
        assert!(state.summary().is_none());
        assert_eq!(state.error().map(ToString::to_string), Some("City not found".into()));
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_ignored() {
        let (provider, session) = gated();

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit("Miami").await }
        });
        provider.entered.notified().await;

        assert_eq!(session.submit("Paris").await, Submission::Ignored);
        assert_eq!(session.state().query, "Miami");

        provider.release.add_permits(1);
        first.await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.state().summary().map(|s| s.place.as_str()), Some("Miami"));
    }

    #[tokio::test]
    async fn later_lookup_replaces_earlier_summary() {
        let provider = Arc::new(RecordingProvider::default());
        let session = WeatherSession::new(Box::new(provider.clone()));

        session.submit("Miami").await;
        session.submit("Paris").await;

        let state = session.state();
        assert_eq!(state.summary().map(|s| s.place.as_str()), Some("Paris"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropped_lookup_clears_loading() {
        let session = WeatherSession::new(Box::new(StuckOnMiami));

        let timed_out = tokio::time::timeout(Duration::from_millis(20), session.submit("Miami")).await;
        assert!(timed_out.is_err());

        let state = session.state();
        assert!(!state.loading);
        assert_eq!(state.error(), Some(&LookupError::Cancelled));

        let Submission::Settled(next) = session.submit("Paris").await else {
            panic!("submission after a dropped lookup should run");
        };
        assert_eq!(next.summary().map(|s| s.place.as_str()), Some("Paris"));
    }
}
