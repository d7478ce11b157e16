//! Route registration and OpenAPI documentation

use super::{
    dto::*,
    error::{route_not_found, ApiError, ErrorMapper},
    handlers,
};
use crate::domain::Service;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_entitlements_handler,
        create_entitlement_handler,
        search_entitlements_handler,
        get_entitlement_handler,
        update_entitlement_handler,
        delete_entitlement_handler,
    ),
    components(schemas(
        EntitlementDto,
        EntitlementStatusDto,
        CreateEntitlementRequest,
        UpdateEntitlementRequest,
        SearchCriteriaDto,
        SearchEntitlementsRequest,
        EntitlementResponse,
        EntitlementListResponse,
        ErrorResponse,
    )),
    tags((name = "entitlements", description = "Entitlement management"))
)]
pub struct ApiDoc;

/// Register all REST routes.
///
/// Also installs the catch-all that answers unknown paths and unsupported
/// methods with `404 Route not found`, so it must be called on the
/// top-level router.
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    errors: ErrorMapper,
) -> anyhow::Result<Router> {
    let entitlements = Router::new()
        .route(
            "/entitlements",
            get(list_entitlements_handler).post(create_entitlement_handler),
        )
        .route("/entitlements/search", post(search_entitlements_handler))
        .route(
            "/entitlements/{id}",
            get(get_entitlement_handler)
                .patch(update_entitlement_handler)
                .delete(delete_entitlement_handler),
        )
        .layer(Extension(service))
        .layer(Extension(errors));

    Ok(router
        .merge(entitlements)
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found))
}

// ===== Handler wrappers that extract service from Extension =====

#[utoipa::path(
    get,
    path = "/entitlements",
    tag = "entitlements",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, defaults to 20, capped at the configured max_page_size (1000 unless overridden)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip, defaults to 0"),
    ),
    responses(
        (status = 200, description = "Page of entitlements ordered by ID", body = EntitlementListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
async fn list_entitlements_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(errors): Extension<ErrorMapper>,
    query: Result<Query<ListEntitlementsQuery>, QueryRejection>,
) -> Result<Json<EntitlementListResponse>, ApiError> {
    handlers::list_entitlements(service, errors, query).await
}

#[utoipa::path(
    post,
    path = "/entitlements",
    tag = "entitlements",
    request_body = CreateEntitlementRequest,
    responses(
        (status = 201, description = "Entitlement created", body = EntitlementResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
async fn create_entitlement_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(errors): Extension<ErrorMapper>,
    json: Result<Json<CreateEntitlementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EntitlementResponse>), ApiError> {
    handlers::create_entitlement(service, errors, json).await
}

#[utoipa::path(
    post,
    path = "/entitlements/search",
    tag = "entitlements",
    request_body = SearchEntitlementsRequest,
    responses(
        (status = 200, description = "Page of matching entitlements", body = EntitlementListResponse),
        (status = 400, description = "Malformed criteria", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
async fn search_entitlements_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(errors): Extension<ErrorMapper>,
    json: Result<Json<SearchEntitlementsRequest>, JsonRejection>,
) -> Result<Json<EntitlementListResponse>, ApiError> {
    handlers::search_entitlements(service, errors, json).await
}

#[utoipa::path(
    get,
    path = "/entitlements/{id}",
    tag = "entitlements",
    params(("id" = i32, Path, description = "Entitlement ID")),
    responses(
        (status = 200, description = "Entitlement found", body = EntitlementResponse),
        (status = 404, description = "No such entitlement", body = ErrorResponse),
    )
)]
async fn get_entitlement_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(errors): Extension<ErrorMapper>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    handlers::get_entitlement(service, errors, path).await
}

#[utoipa::path(
    patch,
    path = "/entitlements/{id}",
    tag = "entitlements",
    params(
        ("id" = i32, Path, description = "Entitlement ID"),
        ("updateMask" = Option<String>, Query, description = "Comma-separated field names to apply"),
    ),
    request_body = UpdateEntitlementRequest,
    responses(
        (status = 200, description = "Entitlement after the update", body = EntitlementResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "No such entitlement", body = ErrorResponse),
    )
)]
async fn update_entitlement_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(errors): Extension<ErrorMapper>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<UpdateEntitlementQuery>, QueryRejection>,
    json: Result<Option<Json<UpdateEntitlementRequest>>, JsonRejection>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    handlers::update_entitlement(service, errors, path, query, json).await
}

#[utoipa::path(
    delete,
    path = "/entitlements/{id}",
    tag = "entitlements",
    params(("id" = i32, Path, description = "Entitlement ID")),
    responses(
        (status = 200, description = "Entitlement deleted", body = EntitlementResponse),
        (status = 404, description = "No such entitlement", body = ErrorResponse),
    )
)]
async fn delete_entitlement_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(errors): Extension<ErrorMapper>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    handlers::delete_entitlement(service, errors, path).await
}
