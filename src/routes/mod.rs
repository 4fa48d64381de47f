mod health_check;
pub mod authentication;
pub mod users;
pub mod products;
pub mod categories;
pub mod suppliers;
pub mod orders;
pub mod reports;

pub use health_check::*;
