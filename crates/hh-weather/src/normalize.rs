//! Normalization of Open-Meteo readings into [`WeatherData`].

use hh_core::WeatherData;

use crate::types::ForecastResponse;

/// Maps a WMO weather interpretation code to `(condition_id, condition)`.
///
/// The labels are the Indonesian strings shown next to the temperature.
#[must_use]
pub fn map_weather_code(code: i32) -> (&'static str, &'static str) {
    match code {
        0 => ("clear", "Cerah"),
        1..=3 => ("cloudy", "Berawan"),
        45 | 48 => ("fog", "Berkabut"),
        51..=57 => ("drizzle", "Gerimis"),
        61..=67 | 80..=82 => ("rain", "Hujan"),
        95..=99 => ("thunderstorm", "Badai Petir"),
        _ => ("unknown", "Tidak diketahui"),
    }
}

/// Converts a forecast response into the domain reading.
#[must_use]
pub fn normalize_forecast(response: &ForecastResponse) -> WeatherData {
    let current = &response.current;
    let (condition_id, condition) = map_weather_code(current.weather_code);
    WeatherData {
        temperature: current.temperature_2m,
        humidity: current.relative_humidity_2m,
        condition: condition.to_string(),
        condition_id: condition_id.to_string(),
    }
}
