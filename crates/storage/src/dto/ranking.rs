use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::{PaginationParams, default_page, default_page_size};

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RankingFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub class_name: Option<String>,
}

impl Default for RankingFilter {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            major: None,
            grade: None,
            class_name: None,
        }
    }
}

impl RankingFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}

/// One student's position in the score ranking. Ties share a rank.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RankingEntry {
    pub rank: i64,
    pub student_id: Uuid,
    pub full_name: String,
    pub student_number: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub total_score: Decimal,
    pub approved_count: i64,
}
