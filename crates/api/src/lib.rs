//! # BookSlot API
//!
//! The API crate provides the web server for the BookSlot appointment
//! service: a booking endpoint for customers, an availability query backed
//! by the core scheduling engine, and the admin surface for reviewing and
//! updating appointments.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Map domain errors onto HTTP responses
//! - **Notify**: Render status-change notification emails
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database access. The
//! pieces every handler needs (the appointment store, the business clock,
//! and the notifier) live in [`ApiState`] as trait objects, so tests run the
//! same handlers against an in-memory store and a pinned clock.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Notification email rendering and delivery seam
pub mod notify;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use bookslot_core::schedule::clock::{BusinessClock, SystemClock};
use bookslot_db::repositories::PgAppointmentStore;
use bookslot_db::store::AppointmentStore;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::notify::{LogNotifier, Notifier};

/// Shared application state accessible to all request handlers.
///
/// Everything here is behind a trait object: production wires up Postgres,
/// the system clock, and the logging notifier, while tests substitute the
/// in-memory store, a fixed clock, and a recording notifier.
pub struct ApiState {
    pub store: Arc<dyn AppointmentStore>,
    pub clock: Arc<dyn BusinessClock>,
    pub notifier: Arc<dyn Notifier>,
    pub config: config::ApiConfig,
}

/// Builds the application router over the given state.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking and admin endpoints
        .merge(routes::appointment::routes())
        // Slot availability endpoint
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database pool.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        store: Arc::new(PgAppointmentStore::new(db_pool)),
        clock: Arc::new(SystemClock),
        notifier: Arc::new(LogNotifier),
        config: config.clone(),
    });

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<axum::http::HeaderValue>().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                |_: tower::BoxError| async { axum::http::StatusCode::REQUEST_TIMEOUT },
            ))
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
