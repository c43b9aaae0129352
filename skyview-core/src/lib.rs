//! Core library for the Skyview weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - A client for the OpenWeather geocoding, current-conditions and
//!   5-day-forecast endpoints
//! - Suggestion lookups with supersession of in-flight queries
//! - Aggregation of 3-hour forecast samples into daily summaries
//! - Day/night display-state derivation
//!
//! It is used by `skyview-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod forecast;
pub mod model;
pub mod suggest;
pub mod validate;

pub use client::OpenWeatherClient;
pub use config::{Config, Units};
pub use dashboard::Dashboard;
pub use display::{DisplayState, Theme};
pub use error::WeatherError;
pub use model::{CurrentConditions, DayAggregate, ForecastSample, GeoCandidate, WeatherReport};
pub use suggest::SuggestionSession;
