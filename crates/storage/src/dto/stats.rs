use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StatsResponse {
    pub total_students: i64,
    pub pending_submissions: i64,
    pub total_clauses: i64,
}

/// Result of rewriting every cached total score
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecomputeTotalsResponse {
    pub students_updated: u64,
}
