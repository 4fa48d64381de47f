pub mod jwt;
pub mod extractors;
