use actix_web::test::TestRequest;
use meethub::config::Config;
use meethub::db;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;

/// Single-connection in-memory pool; one connection keeps the memory
/// database alive for the whole test.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    db::create_schema(&pool)
        .await
        .expect("Failed to create schema");

    pool
}

/// Rate limits high enough that no test ever trips a limiter.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        rate_login_per_min: 10_000,
        rate_register_per_min: 10_000,
    }
}

/// The peer-IP rate limiter rejects requests without a peer address, so
/// every test request carries one.
pub fn peer() -> SocketAddr {
    "127.0.0.1:8080".parse().unwrap()
}

pub fn post_json(path: &str, body: &Value) -> TestRequest {
    TestRequest::post()
        .uri(path)
        .peer_addr(peer())
        .set_json(body)
}

pub fn put_json(path: &str, body: &Value) -> TestRequest {
    TestRequest::put()
        .uri(path)
        .peer_addr(peer())
        .set_json(body)
}

pub fn get(path: &str) -> TestRequest {
    TestRequest::get().uri(path).peer_addr(peer())
}

pub fn delete(path: &str) -> TestRequest {
    TestRequest::delete().uri(path).peer_addr(peer())
}

/// Builds the full route tree against the given pool, exactly as `main`
/// wires it (minus the swagger mount).
#[macro_export]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(|cfg| meethub::routes::configure(cfg, $crate::common::test_config())),
        )
        .await
    };
}
