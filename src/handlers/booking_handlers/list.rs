use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::session::current_user;
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::booking::{self, BookingListParams, BookingPage};
use crate::models::clinic::{self, Clinic};
use crate::templates_structs::{BookingListTemplate, PageContext};

/// GET /dashboard/bookings
/// Lists the signed-in owner's clinic bookings, filtered and sorted by the query string.
pub async fn list(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = current_user(&session, &pool).await? else {
        return Ok(see_other("/login"));
    };

    let params = BookingListParams::from_query(&query);
    let (clinic, booking_page) = load_page(&pool, user.id, &params).await?;

    let ctx = PageContext::build(&session, &user, &config.app_name);
    render(BookingListTemplate::new(ctx, &clinic, booking_page, &params))
}

/// Resolve the user's clinic and read one page of its bookings.
/// A user without a clinic is `NotFound`, never an empty list.
pub async fn load_page(
    pool: &PgPool,
    user_id: i64,
    params: &BookingListParams,
) -> Result<(Clinic, BookingPage), AppError> {
    let clinic = clinic::find_by_owner(pool, user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let booking_page = booking::find_page(pool, clinic.id, params).await?;
    Ok((clinic, booking_page))
}
