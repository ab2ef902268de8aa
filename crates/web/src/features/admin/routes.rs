use axum::{Router, middleware, routing::post};
use storage::Database;

use super::handlers::{create_user, recompute_totals};
use crate::features::clauses;
use crate::middleware::auth::{ApiKeys, require_api_key};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/users", post(create_user))
        .route("/recompute-totals", post(recompute_totals))
        .nest("/clauses", clauses::routes::admin_routes())
        .route_layer(middleware::from_fn_with_state(api_keys, require_api_key))
}
