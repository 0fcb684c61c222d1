use sqlx::PgPool;

use crate::models::table_filter::builder::bind_all;
use crate::models::table_filter::page_count;
use super::filter::{BookingFilter, BookingListParams, BookingSort};
use super::types::{Booking, BookingPage, NewBooking};

const SELECT_BOOKING: &str = "\
    SELECT b.id, b.clinic_id, b.first_name, b.last_name, b.email, b.phone, \
           b.booking_type, b.date, b.time, b.slot, b.created_at \
    FROM bookings b";

/// One page of a clinic's bookings plus the total matching count.
/// Both reads share a single read-only snapshot.
pub async fn find_page(
    pool: &PgPool,
    clinic_id: i64,
    params: &BookingListParams,
) -> Result<BookingPage, sqlx::Error> {
    let clause = params.filter.where_clause(clinic_id);
    let where_sql = clause.sql();
    let n = clause.next_placeholder();

    let data_sql = format!(
        "{SELECT_BOOKING} WHERE {where_sql} ORDER BY {} LIMIT ${} OFFSET ${}",
        params.sort.order_by(),
        n,
        n + 1,
    );
    let count_sql = format!("SELECT COUNT(*) FROM bookings b WHERE {where_sql}");

    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    let bookings = bind_all(sqlx::query_as::<_, Booking>(&data_sql), clause.params())
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

    let (total_count,) = bind_all(sqlx::query_as::<_, (i64,)>(&count_sql), clause.params())
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    log::debug!(
        "clinic {clinic_id}: {} of {total_count} bookings (offset {offset})",
        bookings.len()
    );

    Ok(BookingPage {
        bookings,
        page: params.pagination.page,
        per_page: limit,
        total_count,
        page_count: page_count(total_count, limit),
    })
}

/// All of a clinic's bookings matching the filter, no pagination. Used for CSV export.
pub async fn find_all_filtered(
    pool: &PgPool,
    clinic_id: i64,
    filter: &BookingFilter,
    sort: &BookingSort,
) -> Result<Vec<Booking>, sqlx::Error> {
    let clause = filter.where_clause(clinic_id);
    let sql = format!(
        "{SELECT_BOOKING} WHERE {} ORDER BY {}",
        clause.sql(),
        sort.order_by(),
    );

    bind_all(sqlx::query_as::<_, Booking>(&sql), clause.params())
        .fetch_all(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewBooking) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO bookings \
             (clinic_id, first_name, last_name, email, phone, booking_type, date, time, slot, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id",
    )
    .bind(new.clinic_id)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(new.booking_type.as_str())
    .bind(new.date)
    .bind(new.time)
    .bind(new.slot)
    .bind(new.created_at)
    .fetch_one(pool)
    .await
}
