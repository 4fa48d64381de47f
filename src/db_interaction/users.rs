use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{auth::jwt::UserRole, models::User, password::compute_password_hash, schema::users, telemetry::spawn_blocking_with_tracing, utils::{write_error_chain, DbConnection}};

pub async fn get_user_from_email(
    mut conn: DbConnection,
    email_string: String
) -> Result<QueryResult<User>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        let res: QueryResult<User> = users::table
            .filter(users::email.eq(email_string))
            .get_result::<User>(&mut conn);

        res
    })
    .await
    .context("Failed due to threadpool error")?;

    Ok(res)
}

// Error associated with inserting user to users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("email field is not unique")]
    EmailNotUnique(#[source] diesel::result::Error),
    #[error("unexpected database / hashing error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[derive(Debug)]
pub struct NewUser{
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: UserRole
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(conn, password)
)]
pub async fn insert_user_into_database(
    mut conn: DbConnection,
    new_user: NewUser,
    password: SecretString
) -> Result<Uuid, UserInsertError> {

    let password_hash = spawn_blocking_with_tracing(move || {
        compute_password_hash(password)
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(UserInsertError::UnexpectedError)?
    .map_err(UserInsertError::UnexpectedError)?;

    let uid = Uuid::new_v4();
    // Customers may log in straight away; staff wait for admin approval
    let is_approved = new_user.role == UserRole::Customer;
    let user = User{
        user_id: uid,
        full_name: new_user.full_name,
        email: new_user.email,
        password: password_hash.expose_secret().to_string(),
        phone_number: new_user.phone_number,
        role: new_user.role.as_str().to_string(),
        is_approved,
        created_at: Utc::now()
    };

    spawn_blocking_with_tracing(move || {
        diesel::insert_into(users::table)
            .values(user)
            .execute(&mut conn)
            .map_err(|e|{
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        ref _a
                    ) => {
                        UserInsertError::EmailNotUnique(e)
                    },

                    _ => UserInsertError::UnexpectedError(anyhow::anyhow!("Unexpected diesel / database error"))
                }
            })
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(UserInsertError::UnexpectedError)??;

    Ok(uid)
}

// Row shape returned to the admin user list; never includes the password hash
#[derive(Serialize)]
pub struct UserRecord{
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub is_approved: bool,
    pub created_at: String
}

#[tracing::instrument(
    "Listing users with optional role / approval filters",
    skip(conn)
)]
pub async fn list_users(
    mut conn: DbConnection,
    role_filter: Option<UserRole>,
    approval_filter: Option<bool>
) -> Result<Vec<UserRecord>, anyhow::Error>{
    let rows: Vec<User> = spawn_blocking_with_tracing(move || {
        let mut query = users::table.into_boxed();

        if let Some(role) = role_filter{
            query = query.filter(users::role.eq(role.as_str()));
        }

        if let Some(approved) = approval_filter{
            query = query.filter(users::is_approved.eq(approved));
        }

        query
            .order(users::created_at.desc())
            .load::<User>(&mut conn)
            .context("Failed to load users")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(rows.into_iter().map(|user| UserRecord{
        user_id: user.user_id,
        full_name: user.full_name,
        email: user.email,
        phone_number: user.phone_number,
        role: user.role,
        is_approved: user.is_approved,
        created_at: user.created_at.to_rfc3339()
    }).collect())
}

// Error associated with approving a staff account
#[derive(Error)]
pub enum ApproveStaffError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("user_id: {0} doesn't exist")]
    NoUserIdError(Uuid),
    #[error("user_id: {0} is not a staff account")]
    NotStaffError(Uuid)
}

impl Debug for ApproveStaffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Approving staff account",
    skip(conn)
)]
pub async fn approve_staff(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<(), ApproveStaffError> {
    spawn_blocking_with_tracing(move || {
        let role: Option<String> = users::table
            .select(users::role)
            .filter(users::user_id.eq(user_id))
            .first::<String>(&mut conn)
            .optional()?;

        match role.as_deref() {
            None => return Err(ApproveStaffError::NoUserIdError(user_id)),
            Some("staff") => {},
            Some(_) => return Err(ApproveStaffError::NotStaffError(user_id))
        }

        diesel::update(users::table)
            .filter(users::user_id.eq(user_id))
            .set(users::is_approved.eq(true))
            .execute(&mut conn)?;

        Ok(())
    })
    .await??;

    Ok(())
}

// Error associated with deleting a user
#[derive(Error)]
pub enum DeleteUserError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("user_id: {0} doesn't exist")]
    NoUserIdError(Uuid),
    #[error("admin users cannot be deleted")]
    AdminDeleteError
}

impl Debug for DeleteUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Deleting user from the database",
    skip(conn)
)]
pub async fn delete_user(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<(), DeleteUserError> {
    spawn_blocking_with_tracing(move || {
        let role: Option<String> = users::table
            .select(users::role)
            .filter(users::user_id.eq(user_id))
            .first::<String>(&mut conn)
            .optional()?;

        match role.as_deref() {
            None => return Err(DeleteUserError::NoUserIdError(user_id)),
            Some("admin") => return Err(DeleteUserError::AdminDeleteError),
            Some(_) => {}
        }

        diesel::delete(users::table)
            .filter(users::user_id.eq(user_id))
            .execute(&mut conn)?;

        Ok(())
    })
    .await??;

    Ok(())
}
