//! Mapper implementations for converting between DTOs and contract models
//!
//! Request DTOs stay lenient (plain strings and JSON values) where clients
//! are known to send loose input; the strict parsing happens here.

use super::dto::*;
use crate::contract::{
    self, Entitlement, EntitlementError, EntitlementPatch, NewEntitlement, Page, SearchCriteria,
};
use crate::domain::validation::parse_page_value;
use chrono::NaiveDate;

// ===== Status conversions =====

impl From<contract::EntitlementStatus> for EntitlementStatusDto {
    fn from(status: contract::EntitlementStatus) -> Self {
        match status {
            contract::EntitlementStatus::Pending => Self::Pending,
            contract::EntitlementStatus::Fulfilled => Self::Fulfilled,
            contract::EntitlementStatus::Canceled => Self::Canceled,
        }
    }
}

impl From<EntitlementStatusDto> for contract::EntitlementStatus {
    fn from(status: EntitlementStatusDto) -> Self {
        match status {
            EntitlementStatusDto::Pending => Self::Pending,
            EntitlementStatusDto::Fulfilled => Self::Fulfilled,
            EntitlementStatusDto::Canceled => Self::Canceled,
        }
    }
}

// ===== Entitlement conversions =====

impl From<Entitlement> for EntitlementDto {
    fn from(e: Entitlement) -> Self {
        Self {
            entitlement_id: e.id,
            csp_id: e.csp_id,
            quantity: e.quantity,
            activation_date: e.activation_date,
            end_date: e.end_date,
            is_eval: e.is_eval,
            entitlement_version: e.entitlement_version,
            entitlement_group_id: e.entitlement_group_id,
            uom: e.uom,
            product_type: e.product_type,
            term: e.term,
            source_id: e.source_id,
            sku: e.sku,
            ship_date: e.ship_date,
            start_date: e.start_date,
            status: e.status.into(),
        }
    }
}

impl From<CreateEntitlementRequest> for NewEntitlement {
    fn from(req: CreateEntitlementRequest) -> Self {
        Self {
            csp_id: req.csp_id,
            quantity: req.quantity,
            activation_date: req.activation_date,
            end_date: req.end_date,
            is_eval: req.is_eval.unwrap_or(false),
            entitlement_version: req.entitlement_version,
            entitlement_group_id: req.entitlement_group_id,
            uom: req.uom,
            product_type: req.product_type,
            term: req.term,
            source_id: req.source_id,
            sku: req.sku,
            ship_date: req.ship_date,
            start_date: req.start_date,
            status: req.status.map(Into::into).unwrap_or_default(),
        }
    }
}

impl From<UpdateEntitlementRequest> for EntitlementPatch {
    fn from(req: UpdateEntitlementRequest) -> Self {
        Self {
            csp_id: req.csp_id,
            quantity: req.quantity,
            activation_date: req.activation_date,
            end_date: req.end_date,
            is_eval: req.is_eval,
            entitlement_version: req.entitlement_version,
            entitlement_group_id: req.entitlement_group_id,
            uom: req.uom,
            product_type: req.product_type,
            term: req.term,
            source_id: req.source_id,
            sku: req.sku,
            ship_date: req.ship_date,
            start_date: req.start_date,
            status: req.status.map(Into::into),
        }
    }
}

// ===== Search conversions =====

impl TryFrom<SearchCriteriaDto> for SearchCriteria {
    type Error = EntitlementError;

    fn try_from(dto: SearchCriteriaDto) -> Result<Self, Self::Error> {
        let status = match non_empty(dto.status) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<contract::EntitlementStatus>()
                    .map_err(EntitlementError::bad_request)?,
            ),
            None => None,
        };

        Ok(Self {
            sku: non_empty(dto.sku),
            status,
            csp_id: non_empty(dto.csp_id),
            start_date_from: parse_date("start_date_from", dto.start_date_from)?,
            start_date_to: parse_date("start_date_to", dto.start_date_to)?,
            end_date_from: parse_date("end_date_from", dto.end_date_from)?,
            end_date_to: parse_date("end_date_to", dto.end_date_to)?,
        })
    }
}

/// Pagination value from a search body: a JSON number or a numeric string
pub fn page_value(value: Option<&serde_json::Value>) -> Option<i64> {
    match value? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        serde_json::Value::String(s) => parse_page_value(s),
        _ => None,
    }
}

impl From<Page<Entitlement>> for EntitlementListResponse {
    fn from(page: Page<Entitlement>) -> Self {
        Self {
            count: page.count(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
            data: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(name: &str, value: Option<String>) -> Result<Option<NaiveDate>, EntitlementError> {
    match non_empty(value) {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                EntitlementError::bad_request(format!(
                    "Invalid {name} '{raw}', expected YYYY-MM-DD"
                ))
            }),
        None => Ok(None),
    }
}
