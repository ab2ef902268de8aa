use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClauseRequest {
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(length(min = 1, max = 50, message = "Score range is required"))]
    pub score_range: String,

    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClauseRequest {
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub score_range: Option<String>,

    pub sort_order: Option<i32>,
}
