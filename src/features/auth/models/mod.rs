pub mod customer;
pub mod technician;

pub use customer::Customer;
pub use technician::Technician;
