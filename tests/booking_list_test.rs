//! Bookings dashboard tests: tenant scoping, filters, sort and pagination
//! against a real PostgreSQL schema.

mod common;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use regex::Regex;
use sqlx::PgPool;

use clinicdesk::config::AppConfig;
use clinicdesk::configure_routes;
use clinicdesk::errors::AppError;
use clinicdesk::handlers::booking_handlers::load_page;
use clinicdesk::models::booking::{self, BookingType};
use clinicdesk::models::clinic;
use common::*;

/// Sign in as `email` through the login form, then GET `uri` with the
/// resulting session. Returns (status, body) of the final request.
async fn get_signed_in(pool: &PgPool, email: &str, uri: &str) -> (StatusCode, String) {
    let app = test::init_service(
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(AppConfig::for_database("postgres://unused")))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<Cookie<'static>> = resp.response().cookies().map(|c| c.into_owned()).collect();
    let body = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    let csrf_token = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#)
        .expect("regex")
        .captures(&body)
        .expect("CSRF token on login page")[1]
        .to_string();

    let mut req = test::TestRequest::post().uri("/login").set_form([
        ("email", email),
        ("password", TEST_PASSWORD),
        ("csrf_token", csrf_token.as_str()),
    ]);
    for c in cookies {
        req = req.cookie(c);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "sign-in should redirect");
    let cookies: Vec<Cookie<'static>> = resp.response().cookies().map(|c| c.into_owned()).collect();

    let mut req = test::TestRequest::get().uri(uri);
    for c in cookies {
        req = req.cookie(c);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_only_returns_own_clinic(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    let (_, other_clinic) = owner_with_clinic(&pool, OTHER_OWNER_EMAIL).await;

    for i in 0..3 {
        insert_booking(&pool, clinic_id, &format!("Own{i}"), "a@clinic.test",
            BookingType::Checkup, "2026-03-01T10:00:00Z").await;
    }
    for i in 0..2 {
        insert_booking(&pool, other_clinic, &format!("Other{i}"), "b@clinic.test",
            BookingType::Checkup, "2026-03-01T10:00:00Z").await;
    }

    let (clinic, page) = load_page(&pool, owner, &params(&[])).await.expect("load page");
    assert_eq!(clinic.id, clinic_id);
    assert_eq!(page.total_count, 3);
    assert_eq!(page.bookings.len(), 3);
    assert!(page.bookings.iter().all(|b| b.clinic_id == clinic_id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_without_clinic_is_not_found(pool: PgPool) {
    let lonely = insert_user(&pool, "lonely@clinic.test").await;
    let (_, other_clinic) = owner_with_clinic(&pool, OTHER_OWNER_EMAIL).await;
    insert_booking(&pool, other_clinic, "Kowal", "k@clinic.test",
        BookingType::Consultation, "2026-03-01T10:00:00Z").await;

    let result = load_page(&pool, lonely, &params(&[])).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_combined_filters_apply_to_rows_and_count(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    let (_, other_clinic) = owner_with_clinic(&pool, OTHER_OWNER_EMAIL).await;

    let hit1 = insert_booking(&pool, clinic_id, "Kowalski", "jan@clinic.pl",
        BookingType::Consultation, "2026-03-01T10:00:00Z").await;
    let hit2 = insert_booking(&pool, clinic_id, "Kowalska", "anna@clinic.test",
        BookingType::Checkup, "2026-03-02T10:00:00Z").await;
    // wrong type
    insert_booking(&pool, clinic_id, "Kowal", "x@clinic.pl",
        BookingType::Treatment, "2026-03-03T10:00:00Z").await;
    // wrong email
    insert_booking(&pool, clinic_id, "Kowalczyk", "k@gmail.com",
        BookingType::Checkup, "2026-03-04T10:00:00Z").await;
    // wrong last name
    insert_booking(&pool, clinic_id, "Nowak", "n@clinic.pl",
        BookingType::Consultation, "2026-03-05T10:00:00Z").await;
    // other tenant, otherwise matching
    insert_booking(&pool, other_clinic, "Kowalski", "b@clinic.pl",
        BookingType::Consultation, "2026-03-06T10:00:00Z").await;

    let p = params(&[
        ("lastName", "Kowal"),
        ("type", "consultation.checkup"),
        ("email", "@clinic"),
    ]);
    let (_, page) = load_page(&pool, owner, &p).await.expect("load page");

    assert_eq!(page.total_count, 2);
    assert_eq!(page.page_count, 1);
    let ids: Vec<i64> = page.bookings.iter().map(|b| b.id).collect();
    // default order: newest first
    assert_eq!(ids, vec![hit2, hit1]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_text_filters_are_case_insensitive_and_literal(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    insert_booking(&pool, clinic_id, "Kowal", "kowal@clinic.test",
        BookingType::Checkup, "2026-03-01T10:00:00Z").await;
    insert_booking(&pool, clinic_id, "Nowak", "nowak@clinic.test",
        BookingType::Checkup, "2026-03-02T10:00:00Z").await;

    let (_, page) = load_page(&pool, owner, &params(&[("lastName", "kOW")])).await.expect("load");
    assert_eq!(page.total_count, 1);
    assert_eq!(page.bookings[0].last_name, "Kowal");

    // `%` is matched literally, not as a wildcard
    let (_, page) = load_page(&pool, owner, &params(&[("lastName", "%")])).await.expect("load");
    assert_eq!(page.total_count, 0);
    assert!(page.bookings.is_empty());
    assert_eq!(page.page_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sort_by_last_name_ascending(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    for (name, ts) in [
        ("Zielinski", "2026-03-01T10:00:00Z"),
        ("Adamski", "2026-03-02T10:00:00Z"),
        ("Nowak", "2026-03-03T10:00:00Z"),
    ] {
        insert_booking(&pool, clinic_id, name, "p@clinic.test", BookingType::Checkup, ts).await;
    }

    let (_, page) = load_page(&pool, owner, &params(&[("sort", "lastName.asc")])).await.expect("load");
    let names: Vec<&str> = page.bookings.iter().map(|b| b.last_name.as_str()).collect();
    assert_eq!(names, vec!["Adamski", "Nowak", "Zielinski"]);

    let (_, page) = load_page(&pool, owner, &params(&[("sort", "lastName.desc")])).await.expect("load");
    let names: Vec<&str> = page.bookings.iter().map(|b| b.last_name.as_str()).collect();
    assert_eq!(names, vec!["Zielinski", "Nowak", "Adamski"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_sort_column_orders_newest_first(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    let oldest = insert_booking(&pool, clinic_id, "Adamski", "p@clinic.test",
        BookingType::Checkup, "2026-01-01T10:00:00Z").await;
    let newest = insert_booking(&pool, clinic_id, "Nowak", "p@clinic.test",
        BookingType::Checkup, "2026-03-01T10:00:00Z").await;
    let middle = insert_booking(&pool, clinic_id, "Zielinski", "p@clinic.test",
        BookingType::Checkup, "2026-02-01T10:00:00Z").await;

    let (_, page) = load_page(&pool, owner, &params(&[("sort", "password_hash.asc")]))
        .await
        .expect("load");
    let ids: Vec<i64> = page.bookings.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![newest, middle, oldest]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_slices_and_counts_pages(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    for i in 0..25 {
        insert_booking(&pool, clinic_id, &format!("Patient{i:02}"), "p@clinic.test",
            BookingType::Consultation, &format!("2026-03-01T10:{i:02}:00Z")).await;
    }

    let (_, page1) = load_page(&pool, owner, &params(&[])).await.expect("page 1");
    assert_eq!(page1.per_page, 10);
    assert_eq!(page1.total_count, 25);
    assert_eq!(page1.page_count, 3);
    assert_eq!(page1.bookings.len(), 10);
    assert_eq!(page1.bookings[0].last_name, "Patient24");

    let (_, page3) = load_page(&pool, owner, &params(&[("page", "3")])).await.expect("page 3");
    assert_eq!(page3.page, 3);
    assert_eq!(page3.bookings.len(), 5);
    assert_eq!(page3.bookings[4].last_name, "Patient00");

    // non-positive page behaves as the first page
    let (_, page0) = load_page(&pool, owner, &params(&[("page", "-1")])).await.expect("page 0");
    let first_ids: Vec<i64> = page1.bookings.iter().map(|b| b.id).collect();
    let zero_ids: Vec<i64> = page0.bookings.iter().map(|b| b.id).collect();
    assert_eq!(first_ids, zero_ids);

    // past the end: empty slice, totals intact
    let (_, page9) = load_page(&pool, owner, &params(&[("page", "9")])).await.expect("page 9");
    assert!(page9.bookings.is_empty());
    assert_eq!(page9.total_count, 25);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_created_date_range_is_inclusive(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    insert_booking(&pool, clinic_id, "Before", "p@clinic.test",
        BookingType::Checkup, "2026-02-28T23:59:59Z").await;
    insert_booking(&pool, clinic_id, "FirstDay", "p@clinic.test",
        BookingType::Checkup, "2026-03-01T00:00:00Z").await;
    insert_booking(&pool, clinic_id, "LastDay", "p@clinic.test",
        BookingType::Checkup, "2026-03-15T23:59:59Z").await;
    insert_booking(&pool, clinic_id, "After", "p@clinic.test",
        BookingType::Checkup, "2026-03-16T00:00:00Z").await;

    let p = params(&[("from", "2026-03-01"), ("to", "2026-03-15"), ("sort", "createdAt.asc")]);
    let (_, page) = load_page(&pool, owner, &p).await.expect("load");
    let names: Vec<&str> = page.bookings.iter().map(|b| b.last_name.as_str()).collect();
    assert_eq!(names, vec!["FirstDay", "LastDay"]);

    // open-ended lower bound
    let (_, page) = load_page(&pool, owner, &params(&[("from", "2026-03-15")])).await.expect("load");
    assert_eq!(page.total_count, 2);

    // garbage dates do not filter anything
    let (_, page) = load_page(&pool, owner, &params(&[("from", "soon"), ("to", "later")])).await.expect("load");
    assert_eq!(page.total_count, 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_export_returns_every_matching_row(pool: PgPool) {
    let (_, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    for i in 0..15 {
        let t = if i % 3 == 0 { BookingType::Emergency } else { BookingType::Checkup };
        insert_booking(&pool, clinic_id, &format!("Patient{i:02}"), "p@clinic.test",
            t, &format!("2026-03-01T11:{i:02}:00Z")).await;
    }

    let p = params(&[("type", "checkup"), ("sort", "lastName.asc"), ("per_page", "2")]);
    let rows = booking::find_all_filtered(&pool, clinic_id, &p.filter, &p.sort)
        .await
        .expect("export query");
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|b| b.booking_type == "checkup"));
    assert_eq!(rows[0].last_name, "Patient01");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_type_filter_matches_nothing(pool: PgPool) {
    let (owner, clinic_id) = owner_with_clinic(&pool, OWNER_EMAIL).await;
    insert_booking(&pool, clinic_id, "Kowal", "k@clinic.test",
        BookingType::Checkup, "2026-03-01T10:00:00Z").await;
    insert_booking(&pool, clinic_id, "Nowak", "n@clinic.test",
        BookingType::Emergency, "2026-03-02T10:00:00Z").await;

    let p = params(&[("type", "massage")]);
    let (_, page) = load_page(&pool, owner, &p).await.expect("load");
    assert_eq!(page.total_count, 0);
    assert!(page.bookings.is_empty());

    let rows = booking::find_all_filtered(&pool, clinic_id, &p.filter, &p.sort)
        .await
        .expect("export query");
    assert!(rows.is_empty());

    // known names still apply next to unknown ones
    let (_, page) = load_page(&pool, owner, &params(&[("type", "massage.emergency")]))
        .await
        .expect("load");
    assert_eq!(page.total_count, 1);
    assert_eq!(page.bookings[0].last_name, "Nowak");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signed_in_owner_sees_own_bookings(pool: PgPool) {
    let owner = insert_user_with_password(&pool, OWNER_EMAIL).await;
    let clinic_id = clinic::create(&pool, owner, "Riverside Clinic").await.expect("clinic");
    let (_, other_clinic) = owner_with_clinic(&pool, OTHER_OWNER_EMAIL).await;
    insert_booking(&pool, clinic_id, "Kowalski", "k@clinic.test",
        BookingType::Consultation, "2026-03-01T10:00:00Z").await;
    insert_booking(&pool, clinic_id, "Wisniewska", "w@clinic.test",
        BookingType::Checkup, "2026-03-02T10:00:00Z").await;
    insert_booking(&pool, other_clinic, "Outsider", "o@clinic.test",
        BookingType::Checkup, "2026-03-03T10:00:00Z").await;

    let (status, body) = get_signed_in(&pool, OWNER_EMAIL, "/dashboard/bookings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("data-clinic-id=\"{clinic_id}\"")));
    assert!(body.contains("Kowalski"));
    assert!(body.contains("Wisniewska"));
    assert!(!body.contains("Outsider"));
    assert!(body.contains("Signed in as"));

    let (status, body) =
        get_signed_in(&pool, OWNER_EMAIL, "/dashboard/bookings?lastName=kowal").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kowalski"));
    assert!(!body.contains("Wisniewska"));

    let (status, body) =
        get_signed_in(&pool, OWNER_EMAIL, "/dashboard/bookings/export.csv?type=checkup").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Wisniewska"));
    assert!(!body.contains("Kowalski"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signed_in_user_without_clinic_gets_not_found(pool: PgPool) {
    insert_user_with_password(&pool, "lonely@clinic.test").await;
    let (_, other_clinic) = owner_with_clinic(&pool, OTHER_OWNER_EMAIL).await;
    insert_booking(&pool, other_clinic, "Kowal", "k@clinic.test",
        BookingType::Consultation, "2026-03-01T10:00:00Z").await;

    let (status, body) = get_signed_in(&pool, "lonely@clinic.test", "/dashboard/bookings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains("Kowal"));

    let (status, _) =
        get_signed_in(&pool, "lonely@clinic.test", "/dashboard/bookings/export.csv").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
