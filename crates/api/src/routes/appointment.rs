use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/appointments", post(handlers::appointment::create_appointment))
        .route("/api/appointments", get(handlers::appointment::list_appointments))
        .route("/api/appointments/:id", get(handlers::appointment::get_appointment))
        .route("/api/appointments/:id", patch(handlers::appointment::update_appointment))
        .route(
            "/api/appointments/:id",
            delete(handlers::appointment::delete_appointment),
        )
}
