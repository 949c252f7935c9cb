use utoipa::{Modify, OpenApi};

use crate::features::service_requests::{
    dtos as service_requests_dtos, handlers as service_requests_handlers,
    models as service_requests_models,
};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Service requests (public)
        service_requests_handlers::get_status,
    ),
    components(
        schemas(
            service_requests_models::RequestStatus,
            service_requests_dtos::ServiceRequestStatusDto,
            ApiResponse<service_requests_dtos::ServiceRequestStatusDto>,
        )
    ),
    tags(
        (name = "service-requests", description = "Service request status lookup (public)"),
    ),
    info(
        title = "CSM API",
        version = "0.1.0",
        description = "API documentation for the customer service management app",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
