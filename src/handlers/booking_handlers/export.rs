use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::auth::session::current_user;
use crate::errors::{AppError, see_other};
use crate::models::booking::{self, Booking, BookingListParams};
use crate::models::clinic;

/// GET /dashboard/bookings/export.csv
/// Same filters and sort as the list, every matching row.
pub async fn export_csv(
    pool: web::Data<PgPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = current_user(&session, &pool).await? else {
        return Ok(see_other("/login"));
    };

    let clinic = clinic::find_by_owner(&pool, user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    let params = BookingListParams::from_query(&query);
    let bookings = booking::find_all_filtered(&pool, clinic.id, &params.filter, &params.sort).await?;
    log::info!("User {} exported {} bookings of clinic {}", user.id, bookings.len(), clinic.id);

    let today = Utc::now().format("%Y-%m-%d");
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition",
            format!("attachment; filename=\"bookings-{today}.csv\"")))
        .body(to_csv(&bookings)))
}

pub fn to_csv(bookings: &[Booking]) -> String {
    let mut csv = String::from("id,first_name,last_name,email,phone,type,date,time,slot,created_at\n");
    for b in bookings {
        csv.push_str(&format!("{},{},{},{},{},{},{},{},{},{}\n",
            b.id,
            escape_csv(&b.first_name),
            escape_csv(&b.last_name),
            escape_csv(&b.email),
            escape_csv(&b.phone),
            b.booking_type,
            b.date.format("%Y-%m-%d"),
            b.time.format("%H:%M"),
            b.slot,
            b.created_at.to_rfc3339(),
        ));
    }
    csv
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
