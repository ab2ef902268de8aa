use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{
    get_me, get_my_dashboard, get_student, get_student_change_log, update_me, update_student,
};
use crate::middleware::auth::require_reviewer;

pub fn me_routes() -> Router<Database> {
    Router::new()
        .route("/", get(get_me).put(update_me))
        .route("/dashboard", get(get_my_dashboard))
}

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:id", get(get_student).put(update_student))
        .route("/:id/change-log", get(get_student_change_log))
        .route_layer(middleware::from_fn(require_reviewer))
}
