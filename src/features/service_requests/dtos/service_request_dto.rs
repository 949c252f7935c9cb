use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::service_requests::models::{RequestStatus, ServiceRequest};

/// Date format of the `requestdate` form field and column
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// New service request form
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequestFormDto {
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub requestdate: String,
}

impl CreateServiceRequestFormDto {
    /// Parse `requestdate`. Blank means no date; anything else must be
    /// `YYYY-MM-DD`.
    pub fn request_date(&self) -> Result<Option<NaiveDate>, chrono::ParseError> {
        let raw = self.requestdate.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, REQUEST_DATE_FORMAT).map(Some)
    }

    /// Blank descriptions are stored as NULL.
    pub fn description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Query for the status lookup page
#[derive(Debug, Deserialize)]
pub struct CheckStatusQuery {
    pub service_request_id: Option<String>,
}

impl CheckStatusQuery {
    /// The requested id, if one was given. Non-numeric input yields
    /// `Some(None)` so the page can report it as not found.
    pub fn request_id(&self) -> Option<Option<i64>> {
        let raw = self.service_request_id.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(raw.parse().ok())
    }
}

/// Status of a single service request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceRequestStatusDto {
    pub request_id: i64,
    pub status: RequestStatus,
    pub request_date: Option<NaiveDate>,
    /// Name of the linked inventory item, if any
    pub item_name: Option<String>,
}

/// Service request as listed on the dashboards
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRequestResponseDto {
    pub request_id: i64,
    pub request_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub customer_id: Option<i64>,
    pub technician_id: Option<i64>,
}

impl From<ServiceRequest> for ServiceRequestResponseDto {
    fn from(r: ServiceRequest) -> Self {
        Self {
            request_id: r.id,
            request_date: r.request_date,
            description: r.description,
            status: r.status,
            customer_id: r.customer_id,
            technician_id: r.technician_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(date: &str) -> CreateServiceRequestFormDto {
        CreateServiceRequestFormDto {
            description: "Leaking sink".to_string(),
            requestdate: date.to_string(),
        }
    }

    #[test]
    fn test_request_date_parsing() {
        assert_eq!(
            form("2024-03-01").request_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(form("  ").request_date().unwrap(), None);
        assert!(form("03/01/2024").request_date().is_err());
        assert!(form("2024-02-30").request_date().is_err());
    }

    #[test]
    fn test_blank_description_is_none() {
        let dto = CreateServiceRequestFormDto {
            description: "   ".to_string(),
            requestdate: String::new(),
        };
        assert_eq!(dto.description(), None);
        assert_eq!(form("").description().as_deref(), Some("Leaking sink"));
    }

    #[test]
    fn test_check_status_query() {
        let query = |raw: Option<&str>| CheckStatusQuery {
            service_request_id: raw.map(str::to_string),
        };

        assert_eq!(query(None).request_id(), None);
        assert_eq!(query(Some("")).request_id(), None);
        assert_eq!(query(Some(" 42 ")).request_id(), Some(Some(42)));
        assert_eq!(query(Some("abc")).request_id(), Some(None));
    }

    #[test]
    fn test_long_description_rejected() {
        let dto = CreateServiceRequestFormDto {
            description: "x".repeat(2001),
            requestdate: String::new(),
        };
        assert!(dto.validate().is_err());
    }
}
