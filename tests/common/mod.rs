//! Shared fixtures for integration tests.
//!
//! Database tests take a fresh pool from `#[sqlx::test(migrations = "./migrations")]`,
//! so every test starts from an empty, migrated schema.

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;

use clinicdesk::auth::password;
use clinicdesk::models::booking::{self, BookingListParams, BookingType, NewBooking};
use clinicdesk::models::{clinic, user};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const OWNER_EMAIL: &str = "owner@clinic.test";
pub const OTHER_OWNER_EMAIL: &str = "other@clinic.test";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

// ============================================================================
// FIXTURES
// ============================================================================

pub async fn insert_user(pool: &PgPool, email: &str) -> i64 {
    user::create(pool, &user::NewUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        display_name: String::new(),
    })
    .await
    .expect("Failed to create user")
}

/// A user that can sign in through `/login` with `TEST_PASSWORD`.
pub async fn insert_user_with_password(pool: &PgPool, email: &str) -> i64 {
    user::create(pool, &user::NewUser {
        email: email.to_string(),
        password_hash: password::hash_password(TEST_PASSWORD).expect("Failed to hash password"),
        display_name: String::new(),
    })
    .await
    .expect("Failed to create user")
}

/// Returns (user_id, clinic_id).
pub async fn owner_with_clinic(pool: &PgPool, email: &str) -> (i64, i64) {
    let user_id = insert_user(pool, email).await;
    let clinic_id = clinic::create(pool, user_id, &format!("Clinic of {email}"))
        .await
        .expect("Failed to create clinic");
    (user_id, clinic_id)
}

pub async fn insert_booking(
    pool: &PgPool,
    clinic_id: i64,
    last_name: &str,
    email: &str,
    booking_type: BookingType,
    created_at: &str,
) -> i64 {
    booking::create(pool, &NewBooking {
        clinic_id,
        first_name: "Test".to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        booking_type,
        date: NaiveDate::from_ymd_opt(2026, 6, 1).expect("date"),
        time: NaiveTime::from_hms_opt(10, 0, 0).expect("time"),
        slot: 30,
        created_at: at(created_at),
    })
    .await
    .expect("Failed to create booking")
}

// ============================================================================
// QUERY HELPERS
// ============================================================================

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("Bad timestamp in test")
        .with_timezone(&Utc)
}

pub fn params(pairs: &[(&str, &str)]) -> BookingListParams {
    let query: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BookingListParams::from_query(&query)
}
