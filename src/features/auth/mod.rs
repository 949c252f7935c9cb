pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod models;
pub mod routes;
pub mod services;

pub use guards::{RequireCustomer, RequireTechnician};
pub use services::{AuthService, SessionService};
