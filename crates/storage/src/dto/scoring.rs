use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Achievement, AchievementCategory, ScoreGroup};
use crate::services::scoring;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScorePreviewRequest {
    pub attributes: Achievement,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScorePreviewResponse {
    pub category: AchievementCategory,
    pub score_group: ScoreGroup,
    pub score: Decimal,
    pub cap: Decimal,
}

impl From<&Achievement> for ScorePreviewResponse {
    fn from(attributes: &Achievement) -> Self {
        let category = attributes.category();
        Self {
            category,
            score_group: category.group(),
            score: scoring::score(attributes),
            cap: category.cap(),
        }
    }
}
