//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather current-conditions client behind a provider trait
//! - Shared domain models (summary, errors, condition icons)
//! - The lookup state machine and the session that drives it
//!
//! It is used by `cityweather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod icon;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod session;
pub mod state;

pub use config::Config;
pub use error::LookupError;
pub use icon::{FALLBACK_ICON, icon_for};
pub use lookup::lookup;
pub use model::{WeatherSummary, validate_query};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use session::{Submission, WeatherSession};
pub use state::{Effect, Event, LookupState, Outcome, Panel};
