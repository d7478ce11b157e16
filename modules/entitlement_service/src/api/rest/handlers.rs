//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{ApiError, ErrorMapper},
    mapper::page_value,
};
use crate::contract::{EntitlementPatch, FieldMask, NewEntitlement, SearchCriteria};
use crate::domain::validation::{parse_entitlement_id, parse_page_value};
use crate::domain::Service;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

pub const MSG_SUCCESS: &str = "Success";
pub const MSG_CREATED: &str = "Entitlement created successfully";
pub const MSG_UPDATED: &str = "Entitlement updated successfully";
pub const MSG_DELETED: &str = "Entitlement deleted successfully";

fn success(message: &str, data: Option<EntitlementDto>) -> Json<EntitlementResponse> {
    Json(EntitlementResponse {
        status: "success".to_string(),
        message: message.to_string(),
        data,
    })
}

/// List entitlements, one page at a time
pub async fn list_entitlements(
    service: Arc<Service>,
    errors: ErrorMapper,
    query: Result<Query<ListEntitlementsQuery>, QueryRejection>,
) -> Result<Json<EntitlementListResponse>, ApiError> {
    let Query(query) = query.map_err(|e| errors.map_query_rejection(e))?;
    let page = service.page_request(
        query.limit.as_deref().and_then(parse_page_value),
        query.offset.as_deref().and_then(parse_page_value),
    );

    let page = service
        .get_all(page)
        .await
        .map_err(|e| errors.map_domain_error(e))?;

    Ok(Json(page.into()))
}

/// Filtered listing
pub async fn search_entitlements(
    service: Arc<Service>,
    errors: ErrorMapper,
    json: Result<Json<SearchEntitlementsRequest>, JsonRejection>,
) -> Result<Json<EntitlementListResponse>, ApiError> {
    let Json(req) = json.map_err(|e| errors.map_json_rejection(e))?;

    let criteria = SearchCriteria::try_from(req.criteria.unwrap_or_default())
        .map_err(|e| errors.map_domain_error(e))?;
    let page = service.page_request(page_value(req.limit.as_ref()), page_value(req.offset.as_ref()));

    let page = service
        .search(&criteria, page)
        .await
        .map_err(|e| errors.map_domain_error(e))?;

    Ok(Json(page.into()))
}

/// Get a specific entitlement
pub async fn get_entitlement(
    service: Arc<Service>,
    errors: ErrorMapper,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    let Path(id) = path.map_err(|e| errors.map_path_rejection(e))?;
    let id = parse_entitlement_id(&id).map_err(|e| errors.map_domain_error(e))?;

    let entitlement = service
        .get_by_id(id)
        .await
        .map_err(|e| errors.map_domain_error(e))?;

    Ok(success(MSG_SUCCESS, Some(entitlement.into())))
}

/// Create an entitlement
pub async fn create_entitlement(
    service: Arc<Service>,
    errors: ErrorMapper,
    json: Result<Json<CreateEntitlementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EntitlementResponse>), ApiError> {
    let Json(req) = json.map_err(|e| errors.map_json_rejection(e))?;

    let entitlement = service
        .create(NewEntitlement::from(req))
        .await
        .map_err(|e| errors.map_domain_error(e))?;

    Ok((StatusCode::CREATED, success(MSG_CREATED, Some(entitlement.into()))))
}

/// Partial update, optionally restricted by `?updateMask=a,b`.
///
/// A request without a JSON body is an empty patch. An unreadable body on a
/// missing ID reports the missing ID first.
pub async fn update_entitlement(
    service: Arc<Service>,
    errors: ErrorMapper,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UpdateEntitlementQuery>, QueryRejection>,
    json: Result<Option<Json<UpdateEntitlementRequest>>, JsonRejection>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    let Path(id) = path.map_err(|e| errors.map_path_rejection(e))?;
    let id = parse_entitlement_id(&id).map_err(|e| errors.map_domain_error(e))?;
    let Query(query) = query.map_err(|e| errors.map_query_rejection(e))?;
    let req = match json {
        Ok(body) => body.map(|Json(req)| req).unwrap_or_default(),
        Err(rejection) => {
            service
                .get_by_id(id)
                .await
                .map_err(|e| errors.map_domain_error(e))?;
            return Err(errors.map_json_rejection(rejection));
        }
    };

    let mask = query.update_mask.as_deref().and_then(FieldMask::parse);
    let patch = EntitlementPatch::from(req);

    let entitlement = service
        .update(id, &patch, mask.as_ref())
        .await
        .map_err(|e| errors.map_domain_error(e))?;

    Ok(success(MSG_UPDATED, Some(entitlement.into())))
}

/// Hard delete
pub async fn delete_entitlement(
    service: Arc<Service>,
    errors: ErrorMapper,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    let Path(id) = path.map_err(|e| errors.map_path_rejection(e))?;
    let id = parse_entitlement_id(&id).map_err(|e| errors.map_domain_error(e))?;

    service
        .delete(id)
        .await
        .map_err(|e| errors.map_domain_error(e))?;

    Ok(success(MSG_DELETED, None))
}
