pub mod service_request_service;

pub use service_request_service::{NewServiceRequest, ServiceRequestService};
