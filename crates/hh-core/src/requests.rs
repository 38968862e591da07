use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdminRequestStatus {
    /// Only a pending request can be decided, and a decision is final.
    #[must_use]
    pub fn can_transition_to(self, next: AdminRequestStatus) -> bool {
        matches!(
            (self, next),
            (
                AdminRequestStatus::Pending,
                AdminRequestStatus::Approved | AdminRequestStatus::Rejected
            )
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AdminRequestStatus::Pending => "pending",
            AdminRequestStatus::Approved => "approved",
            AdminRequestStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for AdminRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AdminRequestStatus::Pending),
            "approved" => Ok(AdminRequestStatus::Approved),
            "rejected" => Ok(AdminRequestStatus::Rejected),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// A user's application to become a shop-owning admin.
///
/// Serialized with the camelCase field names of the persisted request list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequest {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub shop_name: String,
    pub location_lat: f64,
    pub location_lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_location_url: Option<String>,
    pub status: AdminRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl AdminRequest {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == AdminRequestStatus::Pending
    }
}

/// The caller-supplied part of an [`AdminRequest`]; id, status and creation
/// time are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdminRequest {
    pub user_id: String,
    pub user_email: String,
    pub shop_name: String,
    pub location_lat: f64,
    pub location_lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_location_url: Option<String>,
}

impl NewAdminRequest {
    /// Build the full record. The status is always `pending`.
    #[must_use]
    pub fn into_request(self, id: String, created_at: DateTime<Utc>) -> AdminRequest {
        AdminRequest {
            id,
            user_id: self.user_id,
            user_email: self.user_email,
            shop_name: self.shop_name,
            location_lat: self.location_lat,
            location_lng: self.location_lng,
            manual_location_url: self.manual_location_url,
            status: AdminRequestStatus::Pending,
            created_at,
        }
    }
}

/// A coordinate as typed into the form: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn is_blank(&self) -> bool {
        match self {
            CoordinateInput::Number(_) => false,
            CoordinateInput::Text(s) => s.trim().is_empty(),
        }
    }

    /// Unparseable text and non-finite values (`NaN`, `inf`, overflow) count
    /// as `0.0`; JSON has no encoding for them.
    fn value(&self) -> f64 {
        let parsed = match self {
            CoordinateInput::Number(n) => *n,
            CoordinateInput::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if parsed.is_finite() {
            parsed
        } else {
            0.0
        }
    }
}

/// Raw "open store" form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequestForm {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub shop_name: String,
    #[serde(default)]
    pub location_lat: Option<CoordinateInput>,
    #[serde(default)]
    pub location_lng: Option<CoordinateInput>,
    #[serde(default)]
    pub manual_location_url: Option<String>,
}

impl AdminRequestForm {
    /// Check the form is complete and convert it into a [`NewAdminRequest`].
    ///
    /// A request needs a signed-in user, a shop name, and either a latitude or
    /// a manual map link. Blank map links are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IncompleteRequest`] naming the first missing field.
    pub fn validate(self) -> Result<NewAdminRequest, CoreError> {
        if self.user_id.trim().is_empty() {
            return Err(CoreError::IncompleteRequest("userId"));
        }
        let shop_name = self.shop_name.trim().to_string();
        if shop_name.is_empty() {
            return Err(CoreError::IncompleteRequest("shopName"));
        }

        let manual_location_url = self
            .manual_location_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        let lat = self.location_lat.filter(|c| !c.is_blank());
        if lat.is_none() && manual_location_url.is_none() {
            return Err(CoreError::IncompleteRequest(
                "locationLat or manualLocationUrl",
            ));
        }

        Ok(NewAdminRequest {
            user_id: self.user_id.trim().to_string(),
            user_email: self.user_email.trim().to_string(),
            shop_name,
            location_lat: lat.as_ref().map_or(0.0, CoordinateInput::value),
            location_lng: self.location_lng.as_ref().map_or(0.0, CoordinateInput::value),
            manual_location_url,
        })
    }
}
