use crate::{
    auth::password::verify_password,
    models::{LoginForm, UserSql},
    session::{LOGIN_USERNAME_KEY, SessionContext},
};
use actix_session::Session;
use actix_web::{HttpResponse, Responder, http::header, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Login form
#[utoipa::path(
    get,
    path = "/EmployeesLogin/Login",
    responses((status = 200, description = "Login form view model")),
    tag = "EmployeesLogin"
)]
pub async fn login_form(ctx: SessionContext) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "username": ctx.username,
        "error": null
    }))
}

/// Log in and store the username in the session
#[utoipa::path(
    post,
    path = "/EmployeesLogin/Login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to employee list"),
        (status = 401, description = "Invalid credentials, form redisplayed")
    ),
    tag = "EmployeesLogin"
)]
#[instrument(name = "login", skip(pool, session, form), fields(username = %form.username))]
pub async fn login(
    pool: web::Data<MySqlPool>,
    session: Session,
    form: web::Form<LoginForm>,
) -> actix_web::Result<impl Responder> {
    let username = form.username.trim();

    if username.is_empty() || form.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Ok(HttpResponse::BadRequest().json(json!({
            "username": form.username,
            "error": "Username and password are required"
        })));
    }

    debug!("Fetching user from database");

    let db_user = match sqlx::query_as::<_, UserSql>(
        r#"
        SELECT id, username, password
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return Ok(invalid_credentials(username));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    if let Err(e) = verify_password(&form.password, &db_user.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Ok(invalid_credentials(username));
    }

    session
        .insert(LOGIN_USERNAME_KEY, db_user.username.clone())
        .map_err(|e| {
            error!(error = %e, "Failed to write session");
            actix_web::error::ErrorInternalServerError("Session error")
        })?;

    info!(user_id = db_user.id, "Login successful");
    Ok(redirect_to("/Employees"))
}

fn invalid_credentials(username: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "username": username,
        "error": "Invalid username or password"
    }))
}

/// Log out and clear the session
#[utoipa::path(
    post,
    path = "/EmployeesLogin/Logout",
    responses((status = 303, description = "Session cleared, redirect to login form")),
    tag = "EmployeesLogin"
)]
pub async fn logout(session: Session) -> impl Responder {
    session.purge();
    redirect_to("/EmployeesLogin/Login")
}
