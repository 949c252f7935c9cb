pub mod dashboard_handler;

pub use dashboard_handler::{customer_dashboard, technician_dashboard};
