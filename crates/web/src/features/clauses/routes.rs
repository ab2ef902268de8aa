use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{create_clause, delete_clause, list_clauses, update_clause};

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(list_clauses))
}

/// Mounted under the API key protected admin router.
pub fn admin_routes() -> Router<Database> {
    Router::new()
        .route("/", post(create_clause))
        .route("/:id", put(update_clause).delete(delete_clause))
}
