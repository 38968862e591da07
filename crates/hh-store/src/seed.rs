//! The default request list written to storage on first run or after the
//! stored list turns out to be unreadable.

use chrono::{DateTime, Utc};
use hh_core::{AdminRequest, AdminRequestStatus};

fn at(unix_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_secs, 0).unwrap_or_default()
}

/// Two pending requests from the demo buyer accounts in `config/catalog.yaml`.
#[must_use]
pub fn seed_requests() -> Vec<AdminRequest> {
    vec![
        AdminRequest {
            id: "req_1705307400000".to_string(),
            user_id: "user-1".to_string(),
            user_email: "budi@example.com".to_string(),
            shop_name: "Warung Makan Budi".to_string(),
            location_lat: -6.2088,
            location_lng: 106.8456,
            manual_location_url: None,
            status: AdminRequestStatus::Pending,
            // 2024-01-15T08:30:00Z
            created_at: at(1_705_307_400),
        },
        AdminRequest {
            id: "req_1705912200000".to_string(),
            user_id: "user-2".to_string(),
            user_email: "rina@example.com".to_string(),
            shop_name: "Es Teh Rina".to_string(),
            location_lat: -6.9175,
            location_lng: 107.6191,
            manual_location_url: Some("https://maps.google.com/?q=-6.9175,107.6191".to_string()),
            status: AdminRequestStatus::Pending,
            // 2024-01-22T08:30:00Z
            created_at: at(1_705_912_200),
        },
    ]
}
