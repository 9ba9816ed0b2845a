//! Weather for the start page.
//!
//! Resolves a city through the Open-Meteo geocoding API, then fetches the
//! current conditions for its coordinates.

pub mod client;
pub mod display;
pub mod types;

pub use client::{GeocodeOutcome, LookupOutcome, WeatherClient};
pub use display::{Fragment, WeatherDisplay};
pub use types::*;
