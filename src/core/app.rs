use std::sync::Arc;

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{Config, SessionConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, SessionService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::service_requests::{routes as service_requests_routes, ServiceRequestService};

/// Services shared by the HTTP handlers
#[derive(Clone)]
pub struct Services {
    pub sessions: Arc<SessionService>,
    pub auth: Arc<AuthService>,
    pub service_requests: Arc<ServiceRequestService>,
    pub dashboard: Arc<DashboardService>,
}

impl Services {
    pub fn new(pool: SqlitePool, session_config: SessionConfig) -> Self {
        let sessions = Arc::new(SessionService::new(pool.clone(), session_config));
        let auth = Arc::new(AuthService::new(pool.clone(), Arc::clone(&sessions)));
        let service_requests = Arc::new(ServiceRequestService::new(pool.clone()));
        let dashboard = Arc::new(DashboardService::new(pool));

        Self {
            sessions,
            auth,
            service_requests,
            dashboard,
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_routes(config: &SwaggerConfig) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    match config.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            swagger.layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            swagger
        }
    }
}

/// Page and API routes with the session layer, without tracing or docs.
pub fn app_routes(services: &Services) -> Router {
    Router::new()
        .merge(auth_routes::routes(Arc::clone(&services.auth)))
        .merge(service_requests_routes::routes(Arc::clone(
            &services.service_requests,
        )))
        .merge(dashboard_routes::routes(Arc::clone(&services.dashboard)))
        .layer(from_fn_with_state(
            Arc::clone(&services.sessions),
            middleware::session_middleware,
        ))
}

/// Full application router.
pub fn build_router(config: &Config, services: &Services) -> Router {
    Router::new()
        .merge(swagger_routes(&config.swagger))
        .merge(app_routes(services))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
