use sqlx::PgPool;
use storage::{
    dto::user::CreateUserRequest, error::Result, models::User,
    repository::user::UserRepository, services::aggregation,
};
use uuid::Uuid;

/// Create an account and issue its API token
pub async fn create_user(pool: &PgPool, request: &CreateUserRequest) -> Result<(User, String)> {
    let repo = UserRepository::new(pool);
    let api_token = generate_api_token();

    let user = repo.create(request, &api_token).await?;

    tracing::info!(
        user_id = %user.user_id,
        role = user.role.as_str(),
        "User account created"
    );

    Ok((user, api_token))
}

/// Rewrite every student's cached total
pub async fn recompute_totals(pool: &PgPool) -> Result<u64> {
    aggregation::recompute_all_totals(pool).await
}

fn generate_api_token() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_tokens_are_unique_hex() {
        let first = generate_api_token();
        let second = generate_api_token();

        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
