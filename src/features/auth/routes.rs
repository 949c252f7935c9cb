use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Login, signup and logout pages (no session required)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/", get(handlers::login_page).post(handlers::login))
        .route(
            "/customer-signup",
            get(handlers::signup_page).post(handlers::signup),
        )
        .route("/logout", get(handlers::logout))
        .with_state(service)
}
