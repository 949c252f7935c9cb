use crate::features::service_requests::handlers;
use crate::features::service_requests::services::ServiceRequestService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<ServiceRequestService>) -> Router {
    Router::new()
        .route(
            "/create-service-request",
            get(handlers::create_page).post(handlers::create),
        )
        .route("/accept-work/{id}", get(handlers::accept_work))
        .route("/start-work/{id}", get(handlers::start_work))
        .route("/complete-work/{id}", get(handlers::complete_work))
        .route("/check-status", get(handlers::check_status_page))
        .route(
            "/api/service-requests/{id}/status",
            get(handlers::get_status),
        )
        .with_state(service)
}
