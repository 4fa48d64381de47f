mod register;
mod login;

pub use register::*;
pub use login::*;
