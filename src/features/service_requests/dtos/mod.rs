pub mod service_request_dto;

pub use service_request_dto::{
    CheckStatusQuery, CreateServiceRequestFormDto, ServiceRequestResponseDto,
    ServiceRequestStatusDto, REQUEST_DATE_FORMAT,
};
