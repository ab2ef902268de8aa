use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::get_review_dashboard;
use crate::middleware::auth::require_reviewer;

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/dashboard", get(get_review_dashboard))
        .route_layer(middleware::from_fn(require_reviewer))
}
