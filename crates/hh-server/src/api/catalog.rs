use axum::{extract::State, Extension, Json};
use hh_core::{AdminWithShop, Province, PROVINCES};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct AdminTotals {
    admins: usize,
    shops: usize,
    products: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct AdminsOverview {
    admins: Vec<AdminWithShop>,
    totals: AdminTotals,
}

pub(super) async fn list_provinces(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<&'static [Province]>> {
    Json(ApiResponse::new(req_id.0, PROVINCES))
}

/// GET /api/v1/admins: Every admin with their shop and products.
pub(super) async fn list_admins(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<AdminsOverview>> {
    let admins = state.catalog.admins_with_shops();
    let totals = AdminTotals {
        admins: admins.len(),
        shops: admins.iter().filter(|a| a.shop.is_some()).count(),
        products: admins.iter().map(|a| a.products.len()).sum(),
    };
    Json(ApiResponse::new(req_id.0, AdminsOverview { admins, totals }))
}
