use serde::Serialize;

use crate::features::service_requests::dtos::ServiceRequestResponseDto;

/// Per-status counts of one technician's requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TechnicianStatusCounts {
    pub total: i64,
    pub new: i64,
    pub in_progress: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicianDashboardDto {
    pub counts: TechnicianStatusCounts,
    pub requests: Vec<ServiceRequestResponseDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerDashboardDto {
    pub requests: Vec<ServiceRequestResponseDto>,
}
