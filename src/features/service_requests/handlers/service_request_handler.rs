use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use minijinja::context;
use validator::Validate;

use crate::core::error::{AppError, PageResult, Result};
use crate::core::extractor::AppForm;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::{RequireCustomer, RequireTechnician};
use crate::features::service_requests::dtos::{
    CheckStatusQuery, CreateServiceRequestFormDto, ServiceRequestStatusDto, REQUEST_DATE_FORMAT,
};
use crate::features::service_requests::services::{NewServiceRequest, ServiceRequestService};
use crate::shared::constants::{MSG_NO_TECHNICIANS, MSG_REQUEST_NOT_FOUND};
use crate::shared::flash::{self, FlashLevel};
use crate::shared::templates::render_page;
use crate::shared::types::ApiResponse;
use crate::shared::validation::error_messages;

const CREATE_PATH: &str = "/create-service-request";
const CUSTOMER_DASHBOARD_PATH: &str = "/customer-dashboard";
const TECHNICIAN_DASHBOARD_PATH: &str = "/technician-dashboard";

/// GET /create-service-request - new request form
pub async fn create_page(
    RequireCustomer(user): RequireCustomer,
    jar: CookieJar,
) -> PageResult<Response> {
    let (jar, messages) = flash::take(jar);
    let today = Utc::now().date_naive().format(REQUEST_DATE_FORMAT).to_string();

    let html = render_page(
        "service_requests/create_service_request.html",
        context! {
            messages => messages,
            user => user,
            today => today,
        },
    )?;
    Ok((jar, Html(html)).into_response())
}

/// POST /create-service-request - submit a request
pub async fn create(
    RequireCustomer(user): RequireCustomer,
    State(service): State<Arc<ServiceRequestService>>,
    jar: CookieJar,
    AppForm(dto): AppForm<CreateServiceRequestFormDto>,
) -> PageResult<Response> {
    if let Err(errors) = dto.validate() {
        let jar = error_messages(&errors)
            .into_iter()
            .fold(jar, |jar, msg| flash::push(jar, FlashLevel::Error, msg));
        return Ok((jar, Redirect::to(CREATE_PATH)).into_response());
    }

    let Ok(request_date) = dto.request_date() else {
        let jar = flash::push(jar, FlashLevel::Error, "Invalid request date.");
        return Ok((jar, Redirect::to(CREATE_PATH)).into_response());
    };

    let input = NewServiceRequest {
        request_date,
        description: dto.description(),
    };

    let jar = match service.create(user.user_id, input).await? {
        Some(request) => flash::push(
            jar,
            FlashLevel::Success,
            format!(
                "Service request submitted successfully! Your request ID is {}",
                request.id
            ),
        ),
        None => flash::push(jar, FlashLevel::Error, MSG_NO_TECHNICIANS),
    };

    Ok((jar, Redirect::to(CUSTOMER_DASHBOARD_PATH)).into_response())
}

/// Flash the outcome of a status change and return to the technician dashboard.
fn status_change_response(
    jar: CookieJar,
    outcome: Result<()>,
    success: &'static str,
) -> PageResult<Response> {
    let jar = match outcome {
        Ok(()) => flash::push(jar, FlashLevel::Success, success),
        Err(AppError::NotFound(msg)) => flash::push(jar, FlashLevel::Error, msg),
        Err(e) => return Err(e.into()),
    };
    Ok((jar, Redirect::to(TECHNICIAN_DASHBOARD_PATH)).into_response())
}

/// GET /accept-work/{id}
pub async fn accept_work(
    RequireTechnician(_user): RequireTechnician,
    State(service): State<Arc<ServiceRequestService>>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> PageResult<Response> {
    let outcome = service.accept(id).await;
    status_change_response(jar, outcome, "Work accepted successfully!")
}

/// GET /start-work/{id}
pub async fn start_work(
    RequireTechnician(_user): RequireTechnician,
    State(service): State<Arc<ServiceRequestService>>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> PageResult<Response> {
    let outcome = service.mark_in_progress(id).await;
    status_change_response(jar, outcome, "Work marked in progress.")
}

/// GET /complete-work/{id}
pub async fn complete_work(
    RequireTechnician(_user): RequireTechnician,
    State(service): State<Arc<ServiceRequestService>>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> PageResult<Response> {
    let outcome = service.mark_completed(id).await;
    status_change_response(jar, outcome, "Work marked completed.")
}

/// GET /check-status - public status lookup page
pub async fn check_status_page(
    State(service): State<Arc<ServiceRequestService>>,
    user: Option<AuthenticatedUser>,
    jar: CookieJar,
    Query(query): Query<CheckStatusQuery>,
) -> PageResult<Response> {
    let (jar, messages) = flash::take(jar);

    let (searched, found) = match query.request_id() {
        None => (false, None),
        Some(None) => (true, None),
        Some(Some(id)) => (true, service.find_status(id).await?),
    };

    let html = render_page(
        "service_requests/check_status.html",
        context! {
            messages => messages,
            user => user,
            query => query.service_request_id,
            searched => searched,
            request => found,
            not_found_message => MSG_REQUEST_NOT_FOUND,
        },
    )?;
    Ok((jar, Html(html)).into_response())
}

/// Get the status of a service request
#[utoipa::path(
    get,
    path = "/api/service-requests/{id}/status",
    params(
        ("id" = i64, Path, description = "Service request ID")
    ),
    responses(
        (status = 200, description = "Status found", body = ApiResponse<ServiceRequestStatusDto>),
        (status = 404, description = "Service request not found")
    ),
    tag = "service-requests"
)]
pub async fn get_status(
    State(service): State<Arc<ServiceRequestService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ServiceRequestStatusDto>>> {
    let status = service
        .find_status(id)
        .await?
        .ok_or_else(|| AppError::NotFound(MSG_REQUEST_NOT_FOUND.to_string()))?;

    Ok(Json(ApiResponse::success(Some(status), None)))
}
