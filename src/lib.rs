pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod templates_structs;

use actix_web::web;

/// Route table for everything behind the login page.
/// Callers wrap it in session middleware; the auth guard is applied here.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(handlers::auth_handlers::login_page))
        .route("/login", web::post().to(handlers::auth_handlers::login_submit))
        // Root redirect
        .route("/", web::get().to(|| async {
            errors::see_other(templates_structs::BOOKINGS_PATH)
        }))
        // Protected routes
        .service(
            web::scope("/dashboard")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/bookings", web::get().to(handlers::booking_handlers::list))
                .route("/bookings/export.csv", web::get().to(handlers::booking_handlers::export_csv))
        )
        .route("/logout", web::post().to(handlers::auth_handlers::logout));
}
