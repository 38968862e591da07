use axum::{
    extract::{Path, State},
    Extension, Json,
};
use hh_core::{find_province, Province, WeatherData, WeatherSuitability};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct WeatherItem {
    province: &'static Province,
    weather: WeatherData,
    suitability: WeatherSuitability,
}

pub(super) fn resolve_province(rid: &str, id: &str) -> Result<&'static Province, ApiError> {
    find_province(id)
        .ok_or_else(|| ApiError::new(rid, "not_found", format!("province '{id}' not found")))
}

/// GET /api/v1/weather/{province}: Current conditions for a province.
pub(super) async fn get_weather(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(province_id): Path<String>,
) -> Result<Json<ApiResponse<WeatherItem>>, ApiError> {
    let province = resolve_province(&req_id.0, &province_id)?;

    let weather = state.weather.current(province).await.map_err(|e| {
        tracing::warn!(province = province.id, error = %e, "weather lookup failed");
        ApiError::new(req_id.0.as_str(), "upstream_error", "weather provider unavailable")
    })?;

    let suitability = weather.suitability();
    Ok(Json(ApiResponse::new(
        req_id.0,
        WeatherItem {
            province,
            weather,
            suitability,
        },
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::{get, json_body, test_app};

    #[tokio::test]
    async fn weather_returns_reading_and_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": -8.65,
                "longitude": 115.2,
                "current": {
                    "temperature_2m": 27.0,
                    "relative_humidity_2m": 80,
                    "weather_code": 2
                }
            })))
            .mount(&server)
            .await;

        let response = get(test_app(&server.uri()), "/api/v1/weather/bali", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["province"]["id"], "bali");
        assert_eq!(json["data"]["weather"]["conditionId"], "cloudy");
        assert_eq!(json["data"]["suitability"], "sejuk");
    }

    #[tokio::test]
    async fn unknown_province_is_not_found() {
        let response = get(
            test_app("http://127.0.0.1:9"),
            "/api/v1/weather/atlantis",
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let response = get(test_app(&server.uri()), "/api/v1/weather/jakarta", None, None).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "upstream_error");
    }
}
