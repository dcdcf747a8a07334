//! Lookup state as an immutable snapshot plus a pure reducer.
//!
//! The reducer never performs I/O. When a submission needs the network it returns an
//! [`Effect`], and whoever drives the reducer feeds the outcome back as
//! [`Event::Settled`].

use crate::{WeatherSummary, error::LookupError, model::validate_query};

/// What the last settled attempt produced. A summary and an error can never coexist.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    /// No attempt has been made yet.
    #[default]
    Idle,
    Summary(WeatherSummary),
    Failed(LookupError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LookupState {
    /// Text of the most recent accepted submission.
    pub query: String,
    pub loading: bool,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Submit(String),
    Settled(Result<WeatherSummary, LookupError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { place: String },
}

/// Which panel a front-end should show for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Instructions,
    Loading,
    Error,
    Result,
}

impl LookupState {
    pub fn apply(&self, event: Event) -> (LookupState, Option<Effect>) {
        match event {
            // The trigger is disabled while a request is in flight.
            Event::Submit(_) if self.loading => (self.clone(), None),

            Event::Submit(query) => match validate_query(&query) {
                Err(err) => {
                    let next = LookupState {
                        query,
                        loading: false,
                        outcome: Outcome::Failed(err),
                    };
                    (next, None)
                }
                Ok(place) => {
                    let effect = Effect::Fetch { place: place.to_string() };
                    // Clear a stale error; a previous summary stays visible until replaced.
                    let outcome = match &self.outcome {
                        Outcome::Failed(_) => Outcome::Idle,
                        other => other.clone(),
                    };
                    let next = LookupState { query, loading: true, outcome };
                    (next, Some(effect))
                }
            },

            Event::Settled(_) if !self.loading => (self.clone(), None),

            Event::Settled(result) => {
                let outcome = match result {
                    Ok(summary) => Outcome::Summary(summary),
                    Err(err) => Outcome::Failed(err),
                };
                let next = LookupState {
                    query: self.query.clone(),
                    loading: false,
                    outcome,
                };
                (next, None)
            }
        }
    }

    pub fn summary(&self) -> Option<&WeatherSummary> {
        match &self.outcome {
            Outcome::Summary(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn panel(&self) -> Panel {
        if self.loading {
            return Panel::Loading;
        }
        match self.outcome {
            Outcome::Idle => Panel::Instructions,
            Outcome::Summary(_) => Panel::Result,
            Outcome::Failed(_) => Panel::Error,
        }
    }
}
