//! Shared fixtures for route tests.

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use hh_core::{find_province, load_catalog};
use hh_store::{AdminRequestRepository, MemoryStore, SessionFlags, StoreConfig};
use hh_weather::WeatherClient;
use tokio::sync::Mutex;
use tower::ServiceExt;

use super::{build_app, default_rate_limit_state, AppState, SharedStore};
use crate::middleware::AuthState;

pub(crate) const TOKEN: &str = "test-superadmin-token";

pub(crate) fn test_state(weather_base: &str) -> AppState {
    let catalog_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("catalog.yaml");
    let catalog = load_catalog(&catalog_path).expect("catalog");

    let config = StoreConfig::default();
    let store: SharedStore = Arc::new(MemoryStore::new());
    let repo = AdminRequestRepository::open(Arc::clone(&store), &config).expect("repository");

    AppState {
        store,
        requests: Arc::new(Mutex::new(repo)),
        session: Arc::new(SessionFlags::new(MemoryStore::new(), &config)),
        catalog: Arc::new(catalog),
        weather: WeatherClient::with_base_url(5, weather_base)
            .expect("weather client")
            .with_retries(0, 0),
        default_province: find_province("jakarta").expect("jakarta"),
    }
}

pub(crate) fn app_with_state(state: AppState) -> Router {
    let auth = AuthState::from_raw(Some(TOKEN), false).expect("auth");
    build_app(state, auth, default_rate_limit_state())
}

pub(crate) fn test_app(weather_base: &str) -> Router {
    app_with_state(test_state(weather_base))
}

pub(crate) async fn get(
    app: Router,
    uri: &str,
    request_id: Option<&str>,
    bearer: Option<&str>,
) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(id) = request_id {
        builder = builder.header("x-request-id", id);
    }
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

pub(crate) async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
    bearer: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).expect("request"))
        .await
        .expect("response")
}

pub(crate) async fn json_body(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}
