pub mod service_request;

pub use service_request::{RequestStatus, ServiceRequest};
