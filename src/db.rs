use chrono::{Duration, NaiveTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::models::booking::{self, BookingType, NewBooking};
use crate::models::{clinic, user};

pub const DEMO_OWNER_EMAIL: &str = "owner@clinic.test";

pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Seed a demo owner, clinic and bookings. Skipped when any user exists.
pub async fn seed_demo(pool: &PgPool, owner_password_hash: &str) -> Result<(), sqlx::Error> {
    let count = user::count(pool).await?;
    if count > 0 {
        log::info!("Database already has {count} users, skipping demo seed");
        return Ok(());
    }

    let owner_id = user::create(pool, &user::NewUser {
        email: DEMO_OWNER_EMAIL.to_string(),
        password_hash: owner_password_hash.to_string(),
        display_name: "Demo Owner".to_string(),
    })
    .await?;
    let clinic_id = clinic::create(pool, owner_id, "Demo Clinic").await?;

    const PATIENTS: &[(&str, &str)] = &[
        ("Anna", "Kowalska"), ("Jan", "Kowalski"), ("Piotr", "Nowak"),
        ("Maria", "Wisniewska"), ("Tomasz", "Wojcik"), ("Ewa", "Kaminska"),
        ("Adam", "Lewandowski"), ("Olga", "Zielinska"), ("Marek", "Szymanski"),
        ("Kasia", "Dabrowska"), ("Lena", "Kozlowska"), ("Igor", "Jankowski"),
    ];

    let today = Utc::now().date_naive();
    let mut created = 0;
    for i in 0..36_i64 {
        let (first, last) = PATIENTS[i as usize % PATIENTS.len()];
        let booking_type = BookingType::ALL[i as usize % BookingType::ALL.len()];
        let domain = if i % 3 == 0 { "clinic.test" } else { "mail.test" };
        let date = today + Duration::days(i % 14);
        let time = NaiveTime::from_hms_opt(8 + (i % 9) as u32, if i % 2 == 0 { 0 } else { 30 }, 0)
            .unwrap_or(NaiveTime::MIN);

        booking::create(pool, &NewBooking {
            clinic_id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase()),
            phone: format!("+48 600 100 {:03}", i),
            booking_type,
            date,
            time,
            slot: if booking_type == BookingType::Treatment { 60 } else { 30 },
            created_at: Utc::now() - Duration::hours(i * 7),
        })
        .await?;
        created += 1;
    }

    log::info!("Demo seed complete: owner {DEMO_OWNER_EMAIL}, clinic {clinic_id}, {created} bookings");
    Ok(())
}

