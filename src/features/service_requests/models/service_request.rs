use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Lifecycle status, stored as the literal display strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
pub enum RequestStatus {
    #[sqlx(rename = "New")]
    #[serde(rename = "New")]
    New,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sqlx(rename = "Completed")]
    #[serde(rename = "Completed")]
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "New",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for service request
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct ServiceRequest {
    #[sqlx(rename = "requestid")]
    pub id: i64,
    #[sqlx(rename = "requestdate")]
    pub request_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: RequestStatus,
    #[sqlx(rename = "customerid")]
    pub customer_id: Option<i64>,
    #[sqlx(rename = "technicianid")]
    pub technician_id: Option<i64>,
    #[sqlx(rename = "itemid")]
    pub item_id: Option<i64>,
}
