mod get;
mod approve;
mod delete;

pub use get::*;
pub use approve::*;
pub use delete::*;
