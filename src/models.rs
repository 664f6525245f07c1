use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::navigation::{DispatchAction, HeaderModel, RenderEntry};

// --- Database Rows ---

/// User
///
/// Profile row (`public.profiles`) resolved during authentication.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    // The RBAC field, e.g. 'admin', 'manager', 'viewer'.
    pub role: String,
}

/// Item
///
/// A row of the `items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

// --- Responses ---

/// ItemsResponse
///
/// Envelope of `GET /api/items`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ItemsResponse {
    #[schema(example = "Data fetched successfully")]
    pub message: String,
    pub data: Vec<Item>,
}

/// ErrorResponse
///
/// Body of every JSON error the API returns.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    #[schema(example = "Server error")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// UserProfile
///
/// Output of `GET /api/me`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

// --- Navigation ---

/// NavigationResponse
///
/// Everything the shell needs to draw its chrome for the current viewer.
#[derive(Debug, Clone, Serialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationResponse {
    pub app_name: String,
    pub role: String,
    pub header: HeaderModel,
    pub show_labels: bool,
    pub entries: Vec<RenderEntry>,
}

/// DispatchRequest
///
/// A click on the entry `id`, together with the client's current expansion state.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DispatchRequest {
    #[schema(example = "reports/sales")]
    pub id: String,
    #[serde(default)]
    pub expanded: Vec<String>,
}

/// DispatchResponse
///
/// What the client must do, plus its expansion state after the click.
#[derive(Debug, Clone, Serialize, TS, ToSchema)]
#[ts(export)]
pub struct DispatchResponse {
    pub action: DispatchAction,
    pub expanded: Vec<String>,
}

/// NavigationReport
///
/// Load-time audit of the route configuration (admin only).
#[derive(Debug, Clone, Serialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationReport {
    pub node_count: usize,
    pub issues: Vec<crate::navigation::ConfigIssue>,
}
