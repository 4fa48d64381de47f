pub mod users;
pub mod categories;
pub mod suppliers;
pub mod products;
pub mod orders;
pub mod reports;

pub use users::*;
pub use categories::*;
pub use suppliers::*;
pub use products::*;
pub use orders::*;
pub use reports::*;
