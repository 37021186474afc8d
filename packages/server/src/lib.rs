#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the disaster map application.
//!
//! Exposes incident reporting, crowd verification, and the point and
//! route risk checks as a JSON API. Incidents are held in an in-process
//! store for the lifetime of the server.

mod error;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use disaster_map_database::InMemoryIncidentStore;
use disaster_map_service::{DisasterService, ServiceError};

/// Shared application state.
pub struct AppState {
    /// Risk, route, and verification operations.
    pub service: DisasterService,
}

/// Registers every `/api` route plus the JSON body error handler.
///
/// Kept separate from [`run_server`] so tests can mount the same routes
/// on a test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(ServiceError::InvalidInput(err.to_string())).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/incidents", web::get().to(handlers::list_incidents))
            .route("/incidents", web::post().to(handlers::create_incident))
            .route("/incidents/{id}", web::get().to(handlers::get_incident))
            .route("/incidents/{id}", web::delete().to(handlers::delete_incident))
            .route("/incidents/{id}/vote", web::post().to(handlers::vote))
            .route("/risk/check", web::post().to(handlers::check_risk))
            .route("/route/check", web::post().to(handlers::check_route))
            .route("/route/corridor", web::post().to(handlers::check_corridor)),
    );
}

/// Starts the disaster map API server.
///
/// Reads `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `8080`)
/// from the environment. This is a regular async function; the caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let state = web::Data::new(AppState {
        service: DisasterService::new(Arc::new(InMemoryIncidentStore::new())),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
