pub mod auth;
pub mod dashboard;
pub mod service_requests;
