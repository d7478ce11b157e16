//! HTTP application assembly: info endpoint, OpenAPI document, middleware

use crate::config::{AppConfig, ServerConfig};
use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Extension, Json, Router,
};
use entitlement_service::api::rest::routes::ApiDoc;
use entitlement_service::EntitlementServiceModule;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Payload of `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub api_version: String,
    pub environment: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

impl ApiInfo {
    pub fn new(server: &ServerConfig) -> Self {
        let endpoint = |method, path, description| EndpointInfo {
            method,
            path,
            description,
        };
        Self {
            name: "Entitlements API",
            description: "API for managing entitlements",
            version: env!("CARGO_PKG_VERSION"),
            api_version: server.api_version.clone(),
            environment: server.environment.to_string(),
            endpoints: vec![
                endpoint("GET", "/entitlements", "List entitlements (limit, offset)"),
                endpoint("GET", "/entitlements/{id}", "Get an entitlement by ID"),
                endpoint("POST", "/entitlements", "Create an entitlement"),
                endpoint(
                    "PATCH",
                    "/entitlements/{id}",
                    "Update an entitlement, optionally restricted by ?updateMask=",
                ),
                endpoint("DELETE", "/entitlements/{id}", "Delete an entitlement"),
                endpoint("POST", "/entitlements/search", "Search entitlements by criteria"),
                endpoint("GET", "/docs/openapi.json", "OpenAPI document"),
            ],
        }
    }
}

async fn api_info(Extension(info): Extension<Arc<ApiInfo>>) -> Json<ApiInfo> {
    Json(info.as_ref().clone())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.info.title = "Entitlements API".to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    Json(doc)
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer> {
    let origins = server
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Full router: server endpoints, the entitlement module, then middleware
pub fn build_router(module: &EntitlementServiceModule, config: &AppConfig) -> Result<Router> {
    let info = Arc::new(ApiInfo::new(&config.server));

    let router = Router::new()
        .route("/", get(api_info))
        .route("/docs/openapi.json", get(openapi_json))
        .layer(Extension(info));

    let router = module
        .register_rest(router)?
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&config.server)?);

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use entitlement_service::Config;
    use sea_orm::{ConnectOptions, Database};
    use tower::ServiceExt;

    async fn test_app(config: &AppConfig) -> Router {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1);
        let db = Database::connect(opts).await.unwrap();

        let module = EntitlementServiceModule::new(config.module_config());
        module.migrate(&db).await.unwrap();
        module.init(Arc::new(db)).unwrap();
        build_router(&module, config).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_info_endpoint() {
        let config = AppConfig::default();
        let app = test_app(&config).await;

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let json = body_json(response).await;
        assert_eq!(json["name"], "Entitlements API");
        assert_eq!(json["api_version"], "v1");
        assert_eq!(json["environment"], "development");
        assert!(json["endpoints"].as_array().unwrap().len() >= 6);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = test_app(&AppConfig::default()).await;

        let response = app
            .oneshot(
                Request::get("/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["info"]["title"], "Entitlements API");
        assert!(json["paths"]["/entitlements/{id}"].is_object());
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let app = test_app(&AppConfig::default()).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/entitlements")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "PATCH")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get("access-control-allow-credentials").unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_production_errors_have_no_stack() {
        let mut config = AppConfig::default();
        config.server.environment = Environment::Production;
        config.entitlements = Config::default();
        let app = test_app(&config).await;

        let response = app
            .oneshot(
                Request::get("/entitlements/12345")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Entitlement with ID 12345 not found");
        assert!(json.get("stack").is_none());
    }
}
