use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Achievement, AchievementCategory, UnknownVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    /// Withdrawn by its author before review
    Revoked,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Revoked => "revoked",
        }
    }

    /// Approved or rejected by a reviewer.
    pub fn is_reviewed(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl TryFrom<String> for SubmissionStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "revoked" => Ok(Self::Revoked),
            _ => Err(UnknownVariant {
                kind: "submission status",
                value,
            }),
        }
    }
}

/// A student's claim of an achievement, with its review state.
#[derive(Debug, Clone, FromRow)]
pub struct Submission {
    pub submission_id: Uuid,
    pub student_id: Uuid,
    #[sqlx(try_from = "String")]
    pub category: AchievementCategory,
    pub attributes: Json<Achievement>,
    pub description: String,
    pub proof_url: String,
    pub self_score: Decimal,
    /// Engine output for `attributes` at submission time.
    pub suggested_score: Decimal,
    #[sqlx(try_from = "String")]
    pub status: SubmissionStatus,
    pub approved_score: Option<Decimal>,
    pub reject_reason: Option<String>,
    pub reviewer_id: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
