//! Core library for the `citycast` weather lookup.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The provider abstraction and the OpenWeather implementation
//! - The lookup client and its two display regions
//! - Text rendering of a reading
//!
//! It is used by `citycast-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;

pub use client::{ClientState, View, WeatherClient};
pub use config::{Config, Settings};
pub use error::FetchError;
pub use model::{Query, WeatherReading};
pub use provider::{WeatherProvider, provider_from_settings};
