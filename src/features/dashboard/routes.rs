use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Technician and customer dashboards
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route(
            "/technician-dashboard",
            get(handlers::technician_dashboard),
        )
        .route("/customer-dashboard", get(handlers::customer_dashboard))
        .with_state(dashboard_service)
}
