pub mod user_email;
pub mod phone_number;
