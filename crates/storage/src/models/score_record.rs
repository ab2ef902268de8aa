use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ScoreGroup;

/// Final score granted for one approved submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoreRecord {
    pub record_id: Uuid,
    pub submission_id: Uuid,
    pub student_id: Uuid,
    #[sqlx(try_from = "String")]
    pub score_group: ScoreGroup,
    pub score: Decimal,
    pub created_at: NaiveDateTime,
}
