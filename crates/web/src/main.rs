use anyhow::Context;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod app;
mod config;
mod error;
mod extract;
mod features;
mod middleware;

use config::Config;
use features::{admin, clauses, ranking, reviews, scoring, stats, students, submissions};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        stats::handlers::get_stats,
        clauses::handlers::list_clauses,
        clauses::handlers::create_clause,
        clauses::handlers::update_clause,
        clauses::handlers::delete_clause,
        scoring::handlers::preview_score,
        students::handlers::get_me,
        students::handlers::update_me,
        students::handlers::get_my_dashboard,
        students::handlers::get_student,
        students::handlers::update_student,
        students::handlers::get_student_change_log,
        submissions::handlers::list_submissions,
        submissions::handlers::create_submission,
        submissions::handlers::get_submission,
        submissions::handlers::update_submission,
        submissions::handlers::delete_submission,
        submissions::handlers::withdraw_submission,
        submissions::handlers::approve_submission,
        submissions::handlers::reject_submission,
        submissions::handlers::revoke_submission,
        reviews::handlers::get_review_dashboard,
        ranking::handlers::get_ranking,
        admin::handlers::create_user,
        admin::handlers::recompute_totals,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::clause::CreateClauseRequest,
            storage::dto::clause::UpdateClauseRequest,
            storage::dto::scoring::ScorePreviewRequest,
            storage::dto::scoring::ScorePreviewResponse,
            storage::dto::stats::StatsResponse,
            storage::dto::stats::RecomputeTotalsResponse,
            storage::dto::submission::SubmissionResponse,
            storage::dto::submission::CreateSubmissionRequest,
            storage::dto::submission::UpdateSubmissionRequest,
            storage::dto::submission::ApproveSubmissionRequest,
            storage::dto::submission::RejectSubmissionRequest,
            storage::dto::submission::ReviewDashboardResponse,
            storage::dto::ranking::RankingEntry,
            storage::dto::user::UserResponse,
            storage::dto::user::CreateUserRequest,
            storage::dto::user::CreatedUserResponse,
            storage::dto::user::UpdateProfileRequest,
            storage::dto::user::StudentDashboardResponse,
            storage::services::aggregation::ScoreTotals,
            storage::models::Achievement,
            storage::models::AchievementCategory,
            storage::models::ScoreGroup,
            storage::models::SubmissionStatus,
            storage::models::Role,
            storage::models::ScoreClause,
            storage::models::ScoreRecord,
            storage::models::ProfileChangeLog,
        )
    ),
    tags(
        (name = "stats", description = "Public counters"),
        (name = "clauses", description = "Published scoring rules"),
        (name = "scoring", description = "Scoring engine preview"),
        (name = "me", description = "The calling user's profile and dashboard"),
        (name = "submissions", description = "Achievement submissions and their review"),
        (name = "reviews", description = "Reviewer dashboard"),
        (name = "rankings", description = "Student ranking by total score"),
        (name = "students", description = "Student profiles for reviewers"),
        (name = "admin", description = "API key protected administration"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting student scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::with_max_connections(&config.database_url, config.max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database connection established"
    );

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, admin routes will reject every request");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = app::build_router(db, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, router).await?;

    Ok(())
}
