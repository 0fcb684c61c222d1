use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use clinicdesk::config::AppConfig;
use clinicdesk::{auth, configure_routes, db, errors};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    if config.seed_demo {
        let owner_hash = auth::password::hash_password("admin123")
            .expect("Failed to hash demo password");
        db::seed_demo(&pool, &owner_hash)
            .await
            .expect("Failed to seed demo data");
    }

    // Session encryption key: load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = config.bind_addr.clone();
    let cookie_secure = config.cookie_secure;
    let config = web::Data::new(config);
    let pool = web::Data::new(pool);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(pool.clone())
            .app_data(config.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(configure_routes)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async { errors::not_found_page() }))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
