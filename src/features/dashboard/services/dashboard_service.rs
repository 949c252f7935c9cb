use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{
    CustomerDashboardDto, TechnicianDashboardDto, TechnicianStatusCounts,
};
use crate::features::service_requests::models::{RequestStatus, ServiceRequest};

const REQUEST_COLUMNS: &str =
    "requestid, requestdate, description, status, customerid, technicianid, itemid";

/// Service for the per-user dashboard queries
pub struct DashboardService {
    pool: SqlitePool,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Technician
    // ========================================================================

    async fn count_for_technician(
        &self,
        technician_id: i64,
        status: Option<RequestStatus>,
    ) -> Result<i64> {
        let query = match status {
            Some(status) => sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM servicerequests WHERE technicianid = ? AND status = ?",
            )
            .bind(technician_id)
            .bind(status),
            None => sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM servicerequests WHERE technicianid = ?",
            )
            .bind(technician_id),
        };

        query.fetch_one(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to count technician requests: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Counts of all, New, In Progress and Completed requests assigned to
    /// the technician.
    pub async fn technician_counts(&self, technician_id: i64) -> Result<TechnicianStatusCounts> {
        Ok(TechnicianStatusCounts {
            total: self.count_for_technician(technician_id, None).await?,
            new: self
                .count_for_technician(technician_id, Some(RequestStatus::New))
                .await?,
            in_progress: self
                .count_for_technician(technician_id, Some(RequestStatus::InProgress))
                .await?,
            completed: self
                .count_for_technician(technician_id, Some(RequestStatus::Completed))
                .await?,
        })
    }

    pub async fn technician_requests(&self, technician_id: i64) -> Result<Vec<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM servicerequests WHERE technicianid = ? ORDER BY requestid"
        ))
        .bind(technician_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list technician requests: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn technician_dashboard(&self, technician_id: i64) -> Result<TechnicianDashboardDto> {
        let counts = self.technician_counts(technician_id).await?;
        let requests = self.technician_requests(technician_id).await?;

        Ok(TechnicianDashboardDto {
            counts,
            requests: requests.into_iter().map(Into::into).collect(),
        })
    }

    // ========================================================================
    // Customer
    // ========================================================================

    pub async fn customer_requests(&self, customer_id: i64) -> Result<Vec<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM servicerequests WHERE customerid = ? ORDER BY requestid"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list customer requests: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn customer_dashboard(&self, customer_id: i64) -> Result<CustomerDashboardDto> {
        let requests = self.customer_requests(customer_id).await?;

        Ok(CustomerDashboardDto {
            requests: requests.into_iter().map(Into::into).collect(),
        })
    }
}
