//! REST DTOs with serde derives for HTTP API
//!
//! JSON keys follow the `entitlements` column names (`entitlementID`,
//! `csp_ID`, ...), which is what existing clients send and expect.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// ===== Entitlement DTOs =====

/// Entitlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntitlementStatusDto {
    Pending,
    Fulfilled,
    Canceled,
}

/// Entitlement response DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntitlementDto {
    /// Store-assigned identifier
    #[serde(rename = "entitlementID")]
    #[schema(example = 7)]
    pub entitlement_id: i32,

    #[serde(rename = "csp_ID")]
    pub csp_id: Option<String>,

    #[schema(example = 5)]
    pub quantity: Option<i32>,

    pub activation_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub is_eval: bool,

    pub entitlement_version: Option<String>,

    #[serde(rename = "entitlement_group_ID")]
    pub entitlement_group_id: Option<String>,

    pub uom: Option<String>,

    pub product_type: Option<String>,

    pub term: Option<String>,

    #[serde(rename = "source_ID")]
    pub source_id: Option<String>,

    #[schema(example = "SKU1")]
    pub sku: Option<String>,

    pub ship_date: Option<NaiveDate>,

    pub start_date: Option<NaiveDate>,

    pub status: EntitlementStatusDto,
}

/// Create entitlement request; every field is optional
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateEntitlementRequest {
    #[serde(default, rename = "csp_ID")]
    pub csp_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub activation_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Defaults to `false`
    #[serde(default)]
    pub is_eval: Option<bool>,
    #[serde(default)]
    pub entitlement_version: Option<String>,
    #[serde(default, rename = "entitlement_group_ID")]
    pub entitlement_group_id: Option<String>,
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default, rename = "source_ID")]
    pub source_id: Option<String>,
    #[serde(default)]
    #[schema(example = "SKU1")]
    pub sku: Option<String>,
    #[serde(default)]
    pub ship_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Defaults to `PENDING`
    #[serde(default)]
    pub status: Option<EntitlementStatusDto>,
}

/// Partial update request.
///
/// A key that is absent is left alone; an explicit `null` clears a nullable
/// column. `null` for `is_eval` or `status` is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEntitlementRequest {
    #[serde(default, rename = "csp_ID", deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub csp_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub quantity: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<NaiveDate>)]
    pub activation_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<NaiveDate>)]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub is_eval: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub entitlement_version: Option<Option<String>>,
    #[serde(default, rename = "entitlement_group_ID", deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub entitlement_group_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub uom: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub product_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub term: Option<Option<String>>,
    #[serde(default, rename = "source_ID", deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub source_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub sku: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<NaiveDate>)]
    pub ship_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<NaiveDate>)]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub status: Option<EntitlementStatusDto>,
}

/// Marks a key as present even when its value is `null`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ===== Search DTOs =====

/// Search criteria; absent or empty values impose no constraint
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SearchCriteriaDto {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    #[schema(example = "FULFILLED")]
    pub status: Option<String>,
    #[serde(default, rename = "csp_ID")]
    pub csp_id: Option<String>,
    #[serde(default)]
    #[schema(example = "2025-01-01")]
    pub start_date_from: Option<String>,
    #[serde(default)]
    pub start_date_to: Option<String>,
    #[serde(default)]
    pub end_date_from: Option<String>,
    #[serde(default)]
    #[schema(example = "2025-12-31")]
    pub end_date_to: Option<String>,
}

/// Search request body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SearchEntitlementsRequest {
    #[serde(default)]
    pub criteria: Option<SearchCriteriaDto>,
    /// Number or numeric string, defaults to 20
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 20)]
    pub limit: Option<serde_json::Value>,
    /// Number or numeric string, defaults to 0
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 0)]
    pub offset: Option<serde_json::Value>,
}

// ===== Query DTOs =====

/// Query parameters for listing entitlements.
///
/// Kept as strings so that junk input falls back to defaults instead of
/// failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEntitlementsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Query parameters for a partial update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntitlementQuery {
    /// Comma-separated field names
    #[serde(rename = "updateMask")]
    pub update_mask: Option<String>,
}

// ===== Response DTOs =====

/// Envelope for single-record and delete responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntitlementResponse {
    /// Always `"success"`
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    /// `null` for deletes
    pub data: Option<EntitlementDto>,
}

/// Paginated list of entitlements
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntitlementListResponse {
    pub data: Vec<EntitlementDto>,
    /// Number of items in `data`
    pub count: usize,
    /// Number of matching rows across all pages
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Error envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    #[schema(example = "error")]
    pub status: String,
    pub message: String,
    /// Error details, omitted in production
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}
