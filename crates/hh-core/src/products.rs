use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Temperatures at or above this are hot (`panas`).
pub const HOT_THRESHOLD_C: f64 = 30.0;
/// Temperatures at or above this, and below [`HOT_THRESHOLD_C`], are cool (`sejuk`).
pub const COOL_THRESHOLD_C: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Food.
    Makanan,
    /// Drink.
    Minuman,
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductType::Makanan => write!(f, "makanan"),
            ProductType::Minuman => write!(f, "minuman"),
        }
    }
}

/// The weather a product is best enjoyed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSuitability {
    /// Hot.
    Panas,
    /// Cold.
    Dingin,
    /// Cool.
    Sejuk,
    /// Any weather.
    Semua,
}

impl WeatherSuitability {
    /// Bucket a temperature reading in °C. Never returns [`WeatherSuitability::Semua`].
    #[must_use]
    pub fn from_temperature(celsius: f64) -> Self {
        if celsius >= HOT_THRESHOLD_C {
            WeatherSuitability::Panas
        } else if celsius >= COOL_THRESHOLD_C {
            WeatherSuitability::Sejuk
        } else {
            WeatherSuitability::Dingin
        }
    }

    /// Whether a product tagged `self` fits the weather bucket `bucket`.
    #[must_use]
    pub fn matches(self, bucket: WeatherSuitability) -> bool {
        self == bucket || self == WeatherSuitability::Semua
    }
}

impl std::fmt::Display for WeatherSuitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherSuitability::Panas => write!(f, "panas"),
            WeatherSuitability::Dingin => write!(f, "dingin"),
            WeatherSuitability::Sejuk => write!(f, "sejuk"),
            WeatherSuitability::Semua => write!(f, "semua"),
        }
    }
}

impl FromStr for WeatherSuitability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "panas" => Ok(WeatherSuitability::Panas),
            "dingin" => Ok(WeatherSuitability::Dingin),
            "sejuk" => Ok(WeatherSuitability::Sejuk),
            "semua" => Ok(WeatherSuitability::Semua),
            other => Err(CoreError::InvalidSuitability(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub owner_id: String,
    pub shop_name: String,
    /// Opening time as shown to users, e.g. `"08:00"`.
    pub open_time: String,
    pub close_time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// Links to the product on food delivery platforms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gofood_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grabfood_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopeefood_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Price in rupiah, kept as a decimal string on the wire.
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    pub weather_suitability: WeatherSuitability,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub delivery_links: DeliveryLinks,
}
