//! Admin request handlers.
//!
//! - `POST /api/v1/requests`              : submit an "open store" request
//! - `GET  /api/v1/requests/mine`         : a user's own requests
//! - `GET  /api/v1/requests`              : every request (superadmin)
//! - `GET  /api/v1/requests/pending`      : pending requests (superadmin)
//! - `POST /api/v1/requests/{id}/approve` : approve (superadmin)
//! - `POST /api/v1/requests/{id}/reject`  : reject (superadmin)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use hh_core::{AdminRequest, AdminRequestForm, AdminRequestStatus};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct MineQuery {
    pub user_id: Option<String>,
}

pub(super) async fn submit_request(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(form): Json<AdminRequestForm>,
) -> Result<(StatusCode, Json<ApiResponse<AdminRequest>>), ApiError> {
    let rid = req_id.0;

    let new = form
        .validate()
        .map_err(|e| ApiError::new(rid.as_str(), "validation_error", e.to_string()))?;

    // Hold the lock across check and append so two submissions cannot both
    // pass the pending check.
    let mut repo = state.requests.lock().await;
    if repo.has_pending_for(&new.user_id) {
        return Err(ApiError::new(
            rid,
            "conflict",
            format!("user '{}' already has a pending request", new.user_id),
        ));
    }
    let created = repo
        .submit(new)
        .map_err(|e| map_store_error(rid.clone(), &e))?;
    drop(repo);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(rid, created))))
}

pub(super) async fn list_mine(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MineQuery>,
) -> Result<Json<ApiResponse<Vec<AdminRequest>>>, ApiError> {
    let user_id = query
        .user_id
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.as_str(), "validation_error", "user_id is required"))?;

    let repo = state.requests.lock().await;
    let data = repo.for_user(&user_id).into_iter().cloned().collect();
    drop(repo);

    Ok(Json(ApiResponse::new(req_id.0, data)))
}

pub(super) async fn list_requests(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<AdminRequest>>> {
    let data = state.requests.lock().await.requests().to_vec();
    Json(ApiResponse::new(req_id.0, data))
}

pub(super) async fn list_pending(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<AdminRequest>>> {
    let repo = state.requests.lock().await;
    let data = repo.pending().into_iter().cloned().collect();
    drop(repo);
    Json(ApiResponse::new(req_id.0, data))
}

pub(super) async fn approve_request(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdminRequest>>, ApiError> {
    decide(&state, req_id.0, &id, AdminRequestStatus::Approved).await
}

pub(super) async fn reject_request(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdminRequest>>, ApiError> {
    decide(&state, req_id.0, &id, AdminRequestStatus::Rejected).await
}

async fn decide(
    state: &AppState,
    rid: String,
    id: &str,
    status: AdminRequestStatus,
) -> Result<Json<ApiResponse<AdminRequest>>, ApiError> {
    let updated = state
        .requests
        .lock()
        .await
        .update_status(id, status)
        .map_err(|e| map_store_error(rid.clone(), &e))?
        .ok_or_else(|| ApiError::new(rid.as_str(), "not_found", format!("request '{id}' not found")))?;

    Ok(Json(ApiResponse::new(rid, updated)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use hh_store::seed_requests;
    use serde_json::json;

    use super::super::test_support::{
        app_with_state, get, json_body, post_json, test_app, test_state, TOKEN,
    };

    const NO_WEATHER: &str = "http://127.0.0.1:9";

    fn warung_a(user_id: &str) -> serde_json::Value {
        json!({
            "userId": user_id,
            "userEmail": format!("{user_id}@example.com"),
            "shopName": "Warung A",
            "locationLat": "-6.2",
            "locationLng": "106.8",
            "manualLocationUrl": ""
        })
    }

    #[tokio::test]
    async fn submit_creates_pending_request() {
        let state = test_state(NO_WEATHER);
        let app = app_with_state(state.clone());

        let response = post_json(app, "/api/v1/requests", &warung_a("user-9"), None).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "pending");
        assert_eq!(json["data"]["shopName"], "Warung A");
        assert_eq!(json["data"]["locationLat"], -6.2);
        assert!(json["data"].get("manualLocationUrl").is_none());

        let repo = state.requests.lock().await;
        let pending = repo.pending();
        assert_eq!(pending.len(), 3);
        assert_eq!(pending[2].shop_name, "Warung A");
    }

    #[tokio::test]
    async fn submit_with_non_numeric_coordinates_stores_zero() {
        let mut body = warung_a("user-9");
        body["locationLat"] = json!("NaN");
        body["locationLng"] = json!("inf");
        let state = test_state(NO_WEATHER);

        let response =
            post_json(app_with_state(state.clone()), "/api/v1/requests", &body, None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["data"]["locationLat"], 0.0);
        assert_eq!(json["data"]["locationLng"], 0.0);

        let mut repo = state.requests.lock().await;
        assert_eq!(repo.reload().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn submit_ignores_client_status() {
        let mut body = warung_a("user-9");
        body["status"] = json!("approved");
        let response = post_json(test_app(NO_WEATHER), "/api/v1/requests", &body, None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["data"]["status"], "pending");
    }

    #[tokio::test]
    async fn submit_without_location_is_validation_error() {
        let body = json!({ "userId": "user-9", "shopName": "Warung A" });
        let response = post_json(test_app(NO_WEATHER), "/api/v1/requests", &body, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn submit_with_blank_shop_name_is_validation_error() {
        let mut body = warung_a("user-9");
        body["shopName"] = json!("   ");
        let state = test_state(NO_WEATHER);
        let response =
            post_json(app_with_state(state.clone()), "/api/v1/requests", &body, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.requests.lock().await.requests().len(), 2);
    }

    #[tokio::test]
    async fn second_pending_submit_conflicts() {
        // user-1 owns a pending request in the seed list.
        let response = post_json(
            test_app(NO_WEATHER),
            "/api/v1/requests",
            &warung_a("user-1"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn list_mine_requires_user_id() {
        let response = get(test_app(NO_WEATHER), "/api/v1/requests/mine", None, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_mine_returns_only_that_user() {
        let response = get(
            test_app(NO_WEATHER),
            "/api/v1/requests/mine?user_id=user-2",
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["userId"], "user-2");
    }

    #[tokio::test]
    async fn superadmin_routes_require_token() {
        let response = get(test_app(NO_WEATHER), "/api/v1/requests/pending", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = get(
            test_app(NO_WEATHER),
            "/api/v1/requests/pending",
            None,
            Some("wrong"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = post_json(
            test_app(NO_WEATHER),
            "/api/v1/requests/req_1705307400000/approve",
            &json!({}),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_pending_returns_seed_in_order() {
        let response = get(
            test_app(NO_WEATHER),
            "/api/v1/requests/pending",
            None,
            Some(TOKEN),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let ids: Vec<&str> = json["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|r| r["id"].as_str())
            .collect();
        let seed = seed_requests();
        assert_eq!(ids, [seed[0].id.as_str(), seed[1].id.as_str()]);
    }

    #[tokio::test]
    async fn approve_changes_status_only() {
        let state = test_state(NO_WEATHER);
        let seed = seed_requests();
        let uri = format!("/api/v1/requests/{}/approve", seed[0].id);

        let response =
            post_json(app_with_state(state.clone()), &uri, &json!({}), Some(TOKEN)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "approved");

        let repo = state.requests.lock().await;
        let mut expected = seed[0].clone();
        expected.status = hh_core::AdminRequestStatus::Approved;
        assert_eq!(repo.requests()[0], expected);
        assert_eq!(repo.requests()[1], seed[1]);
    }

    #[tokio::test]
    async fn deciding_twice_conflicts() {
        let state = test_state(NO_WEATHER);
        let id = &seed_requests()[1].id;

        let reject = format!("/api/v1/requests/{id}/reject");
        let response =
            post_json(app_with_state(state.clone()), &reject, &json!({}), Some(TOKEN)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let approve = format!("/api/v1/requests/{id}/approve");
        let response = post_json(app_with_state(state), &approve, &json!({}), Some(TOKEN)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn approving_unknown_id_is_not_found() {
        let state = test_state(NO_WEATHER);
        let before = state.requests.lock().await.requests().to_vec();

        let response = post_json(
            app_with_state(state.clone()),
            "/api/v1/requests/req_missing/approve",
            &json!({}),
            Some(TOKEN),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.requests.lock().await.requests(), before.as_slice());
    }
}
