//! Wire types for the Open-Meteo forecast endpoint.

use serde::Deserialize;

/// Top-level response of `GET /v1/forecast` when `current=` is requested.
/// Fields we do not read (units, timezone, elevation) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    /// ISO-8601 local time of the reading, e.g. `"2025-01-15T13:00"`.
    #[serde(default)]
    pub time: Option<String>,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    /// WMO weather interpretation code.
    pub weather_code: i32,
}
