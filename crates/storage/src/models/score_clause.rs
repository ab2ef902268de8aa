use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoreClause {
    pub clause_id: i32,
    pub category: String,
    pub content: String,
    pub score_range: String,
    pub sort_order: i32,
}
