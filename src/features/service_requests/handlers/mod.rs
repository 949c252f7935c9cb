pub mod service_request_handler;

pub use service_request_handler::{
    __path_get_status, accept_work, check_status_page, complete_work, create, create_page,
    get_status, start_work,
};
