//! Current-weather lookups by Indonesian province.

pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use client::{WeatherClient, DEFAULT_BASE_URL};
pub use error::WeatherError;
pub use normalize::{map_weather_code, normalize_forecast};
