mod helpers;
mod health_check;
mod registration;
mod login;
mod categories;
mod suppliers;
