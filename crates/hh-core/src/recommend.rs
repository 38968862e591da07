//! Weather-based product recommendations.
//!
//! The filter is a pure function over an in-memory product list: it never
//! reorders, never mutates its input, and applying it twice gives the same
//! result as applying it once.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductType, WeatherSuitability};
use crate::weather::WeatherData;
use crate::CoreError;

/// Which products the home page shows.
///
/// Starts at [`FilterMode::All`]. The only transition is to
/// [`FilterMode::Weather`] when the user asks for recommendations; nothing
/// resets it automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Weather,
}

impl FilterMode {
    /// The "get recommendations" action.
    #[must_use]
    pub fn get_recommendations(self) -> Self {
        FilterMode::Weather
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Weather => write!(f, "weather"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterMode::All),
            "weather" => Ok(FilterMode::Weather),
            other => Err(CoreError::InvalidFilterMode(other.to_string())),
        }
    }
}

/// User-controlled filter toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationFilters {
    pub by_weather: bool,
}

impl Default for RecommendationFilters {
    fn default() -> Self {
        Self { by_weather: true }
    }
}

impl AsRef<Product> for Product {
    fn as_ref(&self) -> &Product {
        self
    }
}

/// The weather bucket the filter will apply, or `None` when it passes
/// everything through.
#[must_use]
pub fn active_bucket(
    weather: Option<&WeatherData>,
    mode: FilterMode,
    filters: RecommendationFilters,
) -> Option<WeatherSuitability> {
    match (filters.by_weather, mode, weather) {
        (true, FilterMode::Weather, Some(w)) => Some(w.suitability()),
        _ => None,
    }
}

/// Keep the products suited to the current weather.
///
/// Filtering only happens when weather filtering is enabled, a reading is
/// available, and the mode is [`FilterMode::Weather`]; otherwise the input is
/// returned unchanged. A product passes when its tag equals the temperature
/// bucket or is `semua`.
#[must_use]
pub fn filter_products<T>(
    products: &[T],
    weather: Option<&WeatherData>,
    mode: FilterMode,
    filters: RecommendationFilters,
) -> Vec<T>
where
    T: AsRef<Product> + Clone,
{
    match active_bucket(weather, mode, filters) {
        Some(bucket) => products
            .iter()
            .filter(|p| p.as_ref().weather_suitability.matches(bucket))
            .cloned()
            .collect(),
        None => products.to_vec(),
    }
}

/// Filtered products split into the food and drink sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations<T> {
    pub makanan: Vec<T>,
    pub minuman: Vec<T>,
}

impl<T: AsRef<Product>> Recommendations<T> {
    #[must_use]
    pub fn partition(products: Vec<T>) -> Self {
        let (makanan, minuman) = products
            .into_iter()
            .partition(|p| p.as_ref().product_type == ProductType::Makanan);
        Self { makanan, minuman }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.makanan.len() + self.minuman.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.makanan.is_empty() && self.minuman.is_empty()
    }
}
