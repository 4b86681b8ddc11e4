//! Core library for the `clima` weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the app's three endpoint shapes
//! - Device-location acquisition (consent-gated IP geolocation)
//! - Shared domain models and per-screen fetch-cycle state
//!
//! It is used by `clima-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod screen;

pub use config::Config;
pub use error::{FetchError, LocationError};
pub use location::{IpLocationSource, LocationSource};
pub use model::{Coordinates, CurrentReport, ForecastReport, ForecastSlot};
pub use provider::OpenWeatherClient;
pub use screen::{FetchState, Screen, Ticket};
