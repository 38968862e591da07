use axum::{
    extract::{Query, State},
    Extension, Json,
};
use hh_core::{
    recommend::active_bucket, filter_products, FilterMode, ProductWithShop, Province,
    RecommendationFilters, Recommendations, WeatherData, WeatherSuitability,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::weather::resolve_province;
use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationQuery {
    pub province: Option<String>,
    pub mode: Option<String>,
    pub by_weather: Option<bool>,
    /// Overrides the provider reading, in °C.
    pub temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct RecommendationsData {
    province: &'static Province,
    mode: FilterMode,
    by_weather: bool,
    weather: Option<WeatherData>,
    bucket: Option<WeatherSuitability>,
    #[serde(flatten)]
    products: Recommendations<ProductWithShop>,
}

/// GET /api/v1/recommendations: The home page's food and drink lists.
///
/// A failed weather lookup leaves `weather` null and the lists unfiltered.
pub(super) async fn get_recommendations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<ApiResponse<RecommendationsData>>, ApiError> {
    let rid = req_id.0;

    let mode = query
        .mode
        .as_deref()
        .map(str::parse::<FilterMode>)
        .transpose()
        .map_err(|e| ApiError::new(rid.as_str(), "validation_error", e.to_string()))?
        .unwrap_or_default();
    let filters = RecommendationFilters {
        by_weather: query.by_weather.unwrap_or(true),
    };
    let province = match query.province.as_deref() {
        Some(id) => resolve_province(&rid, id)?,
        None => state.default_province,
    };

    let weather = match query.temperature {
        Some(t) if t.is_finite() => Some(WeatherData::manual(t)),
        Some(_) => {
            return Err(ApiError::new(
                rid,
                "validation_error",
                "temperature must be a finite number",
            ))
        }
        None => match state.weather.current(province).await {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(province = province.id, error = %e, "weather lookup failed; showing all products");
                None
            }
        },
    };

    let products = state.catalog.products_with_shop();
    let filtered = filter_products(&products, weather.as_ref(), mode, filters);
    let bucket = active_bucket(weather.as_ref(), mode, filters);

    Ok(Json(ApiResponse::new(
        rid,
        RecommendationsData {
            province,
            mode,
            by_weather: filters.by_weather,
            weather,
            bucket,
            products: Recommendations::partition(filtered),
        },
    )))
}
