use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::session::{self, get_user_id};
use crate::auth::{csrf, password};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::user::{self, LoginForm};
use crate::templates_structs::{BOOKINGS_PATH, LoginTemplate};

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // If already logged in, go straight to the dashboard
    if get_user_id(&session).is_some() {
        return Ok(see_other(BOOKINGS_PATH));
    }

    let tmpl = LoginTemplate {
        error: None,
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(&session),
        email: String::new(),
    };
    render(tmpl)
}

pub async fn login_submit(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let found = user::find_by_email(&pool, &form.email).await?;
    let authenticated = match &found {
        Some(u) => password::verify_password(&form.password, &u.password_hash)?,
        None => false,
    };

    match found {
        Some(u) if authenticated => {
            session::sign_in(&session, &u)?;
            if let Err(e) = session.insert("flash", format!("Signed in as {}", u.name())) {
                log::warn!("Failed to store sign-in flash: {e}");
            }
            log::info!("User {} signed in", u.id);
            Ok(see_other(BOOKINGS_PATH))
        }
        _ => {
            log::warn!("Failed sign-in for '{}'", form.email.trim());
            let tmpl = LoginTemplate {
                error: Some("Invalid email or password".to_string()),
                app_name: config.app_name.clone(),
                csrf_token: csrf::get_or_create_token(&session),
                email: form.email.trim().to_string(),
            };
            render(tmpl)
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session::sign_out(&session);
    Ok(see_other("/login"))
}
