use serde::{Deserialize, Serialize};
use sqlx::Type;

/// Which user table an identity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Technician,
}

impl UserRole {
    /// Landing page after login
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserRole::Customer => "/customer-dashboard",
            UserRole::Technician => "/technician-dashboard",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Customer => write!(f, "customer"),
            UserRole::Technician => write!(f, "technician"),
        }
    }
}

/// Identity attached to a request by the session middleware
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// `customerid` or `technicianid`, depending on `role`
    pub user_id: i64,
    pub role: UserRole,
    pub email: String,
}
