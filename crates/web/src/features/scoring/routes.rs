use axum::{Router, routing::post};
use storage::Database;

use super::handlers::preview_score;

pub fn routes() -> Router<Database> {
    Router::new().route("/preview", post(preview_score))
}
