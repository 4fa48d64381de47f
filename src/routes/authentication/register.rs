use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::{auth::jwt::UserRole, db_interaction::{insert_user_into_database, NewUser, UserInsertError}, domain::{phone_number::PhoneNumberDomain, user_email::UserEmail}, utils::{write_error_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct RegistrationForm{
    full_name: String,
    email: String,
    phone_number: String,
    password: SecretString,
    confirm_password: SecretString,
    role: String
}

#[derive(Error)]
pub enum RegisterError{
    #[error("the password and confirm passwords don't match")]
    PasswordNotMatching,
    #[error("password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("{0}")]
    InvalidField(String),
    #[error("only customer and staff accounts can be registered")]
    UnregistrableRole,
    #[error("email already registered")]
    UserAlreadyExists(#[source] UserInsertError),
    #[error("unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

impl ResponseError for RegisterError{
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            RegisterError::UnexpectedError(_) => HttpResponse::InternalServerError().body(format!("{}", self)),
            _ => HttpResponse::BadRequest().body(format!("{}", self))
        }
    }
}

#[tracing::instrument(
    "User registration started",
    skip(form, pool)
)]
pub async fn register(
    form: web::Form<RegistrationForm>,
    pool: web::Data<DbPool>
) -> Result<HttpResponse, RegisterError> {

    if form.password.expose_secret() != form.confirm_password.expose_secret(){
        return Err(RegisterError::PasswordNotMatching)
    }

    if form.password.expose_secret().len() < 6 {
        return Err(RegisterError::PasswordTooShort)
    }

    let role = UserRole::parse(&form.role)
        .map_err(RegisterError::InvalidField)?;

    // Admin accounts are provisioned out of band, never self-registered
    if role == UserRole::Admin{
        return Err(RegisterError::UnregistrableRole)
    }

    let email = UserEmail::parse(form.email.clone())
        .map_err(RegisterError::InvalidField)?;

    let phone_number = PhoneNumberDomain::parse(form.phone_number.clone())
        .map_err(RegisterError::InvalidField)?;

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(|e| RegisterError::UnexpectedError(e.into()))?;

    let new_user = NewUser{
        full_name: form.0.full_name,
        email: email.inner(),
        phone_number: Some(phone_number.inner()),
        role
    };

    insert_user_into_database(conn, new_user, form.0.password)
        .await
        .map_err(|e| {
            match e {
                UserInsertError::EmailNotUnique(_) => RegisterError::UserAlreadyExists(e),
                UserInsertError::UnexpectedError(_) => RegisterError::UnexpectedError(e.into())
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
