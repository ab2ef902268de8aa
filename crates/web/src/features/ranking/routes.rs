use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::get_ranking;
use crate::middleware::auth::require_reviewer;

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(get_ranking))
        .route_layer(middleware::from_fn(require_reviewer))
}
