use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use std::sync::Arc;

use crate::core::error::PageResult;
use crate::features::auth::{RequireCustomer, RequireTechnician};
use crate::features::dashboard::services::DashboardService;
use crate::shared::flash;
use crate::shared::templates::render_page;

/// GET /technician-dashboard
pub async fn technician_dashboard(
    RequireTechnician(user): RequireTechnician,
    State(service): State<Arc<DashboardService>>,
    jar: CookieJar,
) -> PageResult<Response> {
    let dashboard = service.technician_dashboard(user.user_id).await?;
    let (jar, messages) = flash::take(jar);

    let html = render_page(
        "dashboard/technician_dashboard.html",
        context! {
            messages => messages,
            user => user,
            counts => dashboard.counts,
            requests => dashboard.requests,
        },
    )?;
    Ok((jar, Html(html)).into_response())
}

/// GET /customer-dashboard
pub async fn customer_dashboard(
    RequireCustomer(user): RequireCustomer,
    State(service): State<Arc<DashboardService>>,
    jar: CookieJar,
) -> PageResult<Response> {
    let dashboard = service.customer_dashboard(user.user_id).await?;
    let (jar, messages) = flash::take(jar);

    let html = render_page(
        "dashboard/customer_dashboard.html",
        context! {
            messages => messages,
            user => user,
            requests => dashboard.requests,
        },
    )?;
    Ok((jar, Html(html)).into_response())
}
