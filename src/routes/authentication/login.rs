use actix_web::{error::{ErrorBadRequest, ErrorForbidden, ErrorInternalServerError, ErrorUnauthorized}, web, HttpResponse};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{auth::jwt::{Tokenizer, UserRole}, db_interaction::get_user_from_email, domain::user_email::UserEmail, password::verify_password, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: String,
    pub password: SecretString
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse{
    pub token: String,
    pub role: UserRole,
    pub full_name: String
}

#[tracing::instrument(
    "Logging in user",
    skip(pool, tokenizer, form)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Form<LoginForm>
) -> Result<HttpResponse, actix_web::Error>{
    let email = UserEmail::parse(form.0.email)
                    .map_err(ErrorBadRequest)?;

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let user = match get_user_from_email(conn, email.inner())
                        .await
                        .map_err(ErrorInternalServerError)?
    {
        Ok(user) => user,
        Err(diesel::result::Error::NotFound) => {
            tracing::info!("No user registered with this email");
            return Err(ErrorUnauthorized("Email or password is incorrect"))
        },
        // Connection or query failures must not look like bad credentials
        Err(e) => return Err(ErrorInternalServerError(e))
    };

    let verified = verify_password(form.0.password, user.password.clone())
        .await
        .map_err(ErrorInternalServerError)?;

    if !verified {
        tracing::info!("Passwords did not match");
        return Err(ErrorUnauthorized("Email or password is incorrect"))
    }

    let role = UserRole::parse(&user.role)
        .map_err(ErrorInternalServerError)?;

    // Staff accounts stay locked out until an admin approves them
    if role == UserRole::Staff && !user.is_approved{
        return Err(ErrorForbidden("Your staff account is pending approval by an administrator"))
    }

    let token = tokenizer.generate_key(user.user_id, user.email, role);

    Ok(HttpResponse::Ok().json(LoginResponse{
        token,
        role,
        full_name: user.full_name
    }))
}
