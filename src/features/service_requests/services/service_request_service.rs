use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::service_requests::dtos::ServiceRequestStatusDto;
use crate::features::service_requests::models::{RequestStatus, ServiceRequest};
use crate::shared::constants::MSG_REQUEST_NOT_FOUND;

/// Choose a technician uniformly at random. `None` when the set is empty.
pub fn pick_technician<R: Rng + ?Sized>(technician_ids: &[i64], rng: &mut R) -> Option<i64> {
    technician_ids.choose(rng).copied()
}

/// Input for a new service request
#[derive(Debug, Clone)]
pub struct NewServiceRequest {
    pub request_date: Option<NaiveDate>,
    pub description: Option<String>,
}

pub struct ServiceRequestService {
    pool: SqlitePool,
}

impl ServiceRequestService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn technician_ids(&self) -> Result<Vec<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT technicianid FROM technicians ORDER BY technicianid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load technicians: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Create a request for `customer_id`, assigned to a random technician.
    ///
    /// Returns `None` without writing anything when no technician exists.
    pub async fn create(
        &self,
        customer_id: i64,
        input: NewServiceRequest,
    ) -> Result<Option<ServiceRequest>> {
        let technician_ids = self.technician_ids().await?;

        let picked = pick_technician(&technician_ids, &mut rand::rng());
        let Some(technician_id) = picked else {
            tracing::warn!(
                "No technicians available for request from customer_id={}",
                customer_id
            );
            return Ok(None);
        };

        let result = sqlx::query(
            r#"
            INSERT INTO servicerequests (requestdate, description, status, customerid, technicianid)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.request_date)
        .bind(&input.description)
        .bind(RequestStatus::New)
        .bind(customer_id)
        .bind(technician_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create service request: {:?}", e);
            AppError::Database(e)
        })?;

        let request = ServiceRequest {
            id: result.last_insert_rowid(),
            request_date: input.request_date,
            description: input.description,
            status: RequestStatus::New,
            customer_id: Some(customer_id),
            technician_id: Some(technician_id),
            item_id: None,
        };

        tracing::info!(
            "Service request created: id={}, customer_id={}, technician_id={}",
            request.id,
            customer_id,
            technician_id
        );

        Ok(Some(request))
    }

    /// Overwrite the status of a request. No transition check.
    async fn set_status(&self, request_id: i64, status: RequestStatus) -> Result<()> {
        let affected = sqlx::query("UPDATE servicerequests SET status = ? WHERE requestid = ?")
            .bind(status)
            .bind(request_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update service request status: {:?}", e);
                AppError::Database(e)
            })?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound(MSG_REQUEST_NOT_FOUND.to_string()));
        }

        tracing::info!(
            "Service request status changed: id={}, status={}",
            request_id,
            status
        );
        Ok(())
    }

    pub async fn accept(&self, request_id: i64) -> Result<()> {
        self.set_status(request_id, RequestStatus::InProgress).await
    }

    pub async fn mark_in_progress(&self, request_id: i64) -> Result<()> {
        self.set_status(request_id, RequestStatus::InProgress).await
    }

    pub async fn mark_completed(&self, request_id: i64) -> Result<()> {
        self.set_status(request_id, RequestStatus::Completed).await
    }

    /// Status of one request with its linked item name.
    pub async fn find_status(&self, request_id: i64) -> Result<Option<ServiceRequestStatusDto>> {
        let row = sqlx::query_as::<_, (i64, RequestStatus, Option<NaiveDate>, Option<String>)>(
            r#"
            SELECT sr.requestid, sr.status, sr.requestdate, i.itemname
            FROM servicerequests sr
            LEFT JOIN inventory i ON i.itemid = sr.itemid
            WHERE sr.requestid = ?
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up service request status: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(row.map(
            |(request_id, status, request_date, item_name)| ServiceRequestStatusDto {
                request_id,
                status,
                request_date,
                item_name,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        seed_customer, seed_item, seed_request, seed_technician, test_pool,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn input() -> NewServiceRequest {
        NewServiceRequest {
            request_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            description: Some("Broken boiler".to_string()),
        }
    }

    async fn status_of(pool: &SqlitePool, id: i64) -> String {
        sqlx::query_scalar("SELECT status FROM servicerequests WHERE requestid = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn test_pick_from_empty_set() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_technician(&[], &mut rng), None);
    }

    #[test]
    fn test_pick_is_reproducible_with_seed() {
        let ids = [10, 20, 30, 40];
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| pick_technician(&ids, &mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| pick_technician(&ids, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_covers_whole_set() {
        let ids = [1, 2, 3];
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<i64> = (0..300)
            .filter_map(|_| pick_technician(&ids, &mut rng))
            .collect();
        assert_eq!(seen, HashSet::from(ids));
    }

    #[tokio::test]
    async fn test_create_without_technicians() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "ada@example.com", "pw").await;
        let service = ServiceRequestService::new(pool.clone());

        let created = service.create(customer.id, input()).await.unwrap();
        assert!(created.is_none());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM servicerequests")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_create_assigns_existing_technician() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "ada@example.com", "pw").await;
        let t1 = seed_technician(&pool, "t1@example.com", "pw").await;
        let t2 = seed_technician(&pool, "t2@example.com", "pw").await;
        let service = ServiceRequestService::new(pool.clone());

        let request = service.create(customer.id, input()).await.unwrap().unwrap();

        assert_eq!(request.status, RequestStatus::New);
        assert_eq!(request.customer_id, Some(customer.id));
        assert!([Some(t1.id), Some(t2.id)].contains(&request.technician_id));

        let stored: ServiceRequest = sqlx::query_as(
            "SELECT requestid, requestdate, description, status, customerid, technicianid, itemid FROM servicerequests WHERE requestid = ?",
        )
        .bind(request.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(stored.technician_id, request.technician_id);
        assert_eq!(stored.request_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(stored.description.as_deref(), Some("Broken boiler"));
    }

    #[tokio::test]
    async fn test_mutations_set_literal_status() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "ada@example.com", "pw").await;
        let tech = seed_technician(&pool, "t@example.com", "pw").await;
        let id = seed_request(&pool, customer.id, Some(tech.id), "Completed").await;
        let service = ServiceRequestService::new(pool.clone());

        // No ordering is enforced: a completed request can be accepted again
        service.accept(id).await.unwrap();
        assert_eq!(status_of(&pool, id).await, "In Progress");

        service.mark_completed(id).await.unwrap();
        assert_eq!(status_of(&pool, id).await, "Completed");

        service.mark_in_progress(id).await.unwrap();
        assert_eq!(status_of(&pool, id).await, "In Progress");
    }

    #[tokio::test]
    async fn test_mutation_on_missing_request() {
        let pool = test_pool().await;
        let service = ServiceRequestService::new(pool);

        let result = service.mark_completed(999).await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == MSG_REQUEST_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_find_status_with_item() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "ada@example.com", "pw").await;
        let id = seed_request(&pool, customer.id, None, "New").await;
        let item = seed_item(&pool, "Water pump", 3).await;
        sqlx::query("UPDATE servicerequests SET itemid = ? WHERE requestid = ?")
            .bind(item)
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
        let service = ServiceRequestService::new(pool);

        let status = service.find_status(id).await.unwrap().unwrap();
        assert_eq!(status.status, RequestStatus::New);
        assert_eq!(status.item_name.as_deref(), Some("Water pump"));

        assert!(service.find_status(id + 1).await.unwrap().is_none());
    }
}
