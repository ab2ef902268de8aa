use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    approve_submission, create_submission, delete_submission, get_submission,
    list_submissions, reject_submission, revoke_submission, update_submission,
    withdraw_submission,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_submissions).post(create_submission))
        .route(
            "/:id",
            get(get_submission)
                .put(update_submission)
                .delete(delete_submission),
        )
        .route("/:id/withdraw", post(withdraw_submission))
        .route("/:id/approve", post(approve_submission))
        .route("/:id/reject", post(reject_submission))
        .route("/:id/revoke", post(revoke_submission))
}
