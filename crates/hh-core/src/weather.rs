use serde::{Deserialize, Serialize};

use crate::products::WeatherSuitability;

/// An administrative region used to key the weather lookup. Coordinates are
/// those of the provincial capital.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Province {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

#[rustfmt::skip]
pub const PROVINCES: &[Province] = &[
    Province { id: "jakarta", name: "DKI Jakarta", lat: -6.2088, lng: 106.8456 },
    Province { id: "banten", name: "Banten", lat: -6.1200, lng: 106.1503 },
    Province { id: "jawa-barat", name: "Jawa Barat", lat: -6.9175, lng: 107.6191 },
    Province { id: "jawa-tengah", name: "Jawa Tengah", lat: -6.9667, lng: 110.4167 },
    Province { id: "yogyakarta", name: "DI Yogyakarta", lat: -7.7956, lng: 110.3695 },
    Province { id: "jawa-timur", name: "Jawa Timur", lat: -7.2575, lng: 112.7521 },
    Province { id: "bali", name: "Bali", lat: -8.6705, lng: 115.2126 },
    Province { id: "sumatera-utara", name: "Sumatera Utara", lat: 3.5952, lng: 98.6722 },
    Province { id: "sumatera-barat", name: "Sumatera Barat", lat: -0.9471, lng: 100.4172 },
    Province { id: "kalimantan-timur", name: "Kalimantan Timur", lat: -0.5022, lng: 117.1536 },
    Province { id: "sulawesi-selatan", name: "Sulawesi Selatan", lat: -5.1477, lng: 119.4327 },
    Province { id: "papua", name: "Papua", lat: -2.5337, lng: 140.7181 },
];

/// Look up a province by slug, case-insensitively.
#[must_use]
pub fn find_province(id: &str) -> Option<&'static Province> {
    PROVINCES.iter().find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}

/// A current-conditions reading. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Human-readable condition, e.g. `"Cerah"`.
    pub condition: String,
    /// Stable condition slug, e.g. `"clear"`.
    pub condition_id: String,
}

impl WeatherData {
    /// A reading supplied by the caller instead of the weather provider.
    #[must_use]
    pub fn manual(temperature: f64) -> Self {
        Self {
            temperature,
            humidity: 0.0,
            condition: "Manual".to_string(),
            condition_id: "manual".to_string(),
        }
    }

    #[must_use]
    pub fn suitability(&self) -> WeatherSuitability {
        WeatherSuitability::from_temperature(self.temperature)
    }
}
