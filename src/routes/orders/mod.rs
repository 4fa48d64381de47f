mod post;
mod get;
mod update;

pub use post::*;
pub use get::*;
pub use update::*;
