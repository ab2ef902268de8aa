use axum::{Router, middleware};
use storage::Database;

use crate::features::{admin, clauses, ranking, reviews, scoring, stats, students, submissions};
use crate::middleware::auth::{ApiKeys, require_user};

/// All `/api` routes with their auth layers; docs and CORS are added by `main`.
pub fn build_router(db: Database, api_keys: ApiKeys) -> Router {
    let public = Router::new()
        .nest("/stats", stats::routes::routes())
        .nest("/clauses", clauses::routes::routes())
        .nest("/scoring", scoring::routes::routes());

    let authenticated = Router::new()
        .nest("/me", students::routes::me_routes())
        .nest("/submissions", submissions::routes::routes())
        .nest("/reviews", reviews::routes::routes())
        .nest("/rankings", ranking::routes::routes())
        .nest("/students", students::routes::routes())
        .route_layer(middleware::from_fn_with_state(db.clone(), require_user));

    let api = public
        .merge(authenticated)
        .nest("/admin", admin::routes::routes(api_keys));

    Router::new().nest("/api", api).with_state(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use sqlx::PgPool;
    use tower::ServiceExt;

    const ADMIN_KEY: &str = "test-admin-key";

    fn app() -> Router {
        let pool = PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
        build_router(
            Database::from_pool(pool),
            ApiKeys::from_comma_separated(ADMIN_KEY),
        )
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn decimal(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_score_preview_is_public() {
        let request = json_request(
            "POST",
            "/api/scoring/preview",
            json!({
                "attributes": {
                    "category": "competition",
                    "level": "national_a",
                    "rank": "first",
                    "is_group": false
                }
            }),
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["category"], "competition");
        assert_eq!(body["score_group"], "academic");
        assert_eq!(decimal(&body["score"]), Decimal::from(5));
        assert_eq!(decimal(&body["cap"]), Decimal::from(15));
    }

    #[tokio::test]
    async fn test_score_preview_caps_volunteering() {
        let request = json_request(
            "POST",
            "/api/scoring/preview",
            json!({
                "attributes": {
                    "category": "volunteer",
                    "hours": "250"
                }
            }),
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(decimal(&body["score"]), Decimal::ONE);
    }

    #[tokio::test]
    async fn test_score_preview_rejects_unknown_category_as_json() {
        let request = json_request(
            "POST",
            "/api/scoring/preview",
            json!({ "attributes": { "category": "scholarship" } }),
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("scholarship"));
    }

    #[tokio::test]
    async fn test_score_preview_rejects_malformed_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scoring/preview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"attributes\": "))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_admin_body_without_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/admin/clauses")
            .header(header::AUTHORIZATION, format!("Bearer {ADMIN_KEY}"))
            .body(Body::from("{}"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_user_routes_require_token() {
        for uri in ["/api/me", "/api/submissions", "/api/rankings", "/api/reviews/dashboard"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_admin_routes_reject_unknown_key() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/admin/recompute-totals")
            .header(header::AUTHORIZATION, "Bearer not-the-key")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_admin_create_user_validates_before_storage() {
        let mut request = json_request(
            "POST",
            "/api/admin/users",
            json!({
                "username": "zhao.lei",
                "role": "student",
                "full_name": "Zhao Lei"
            }),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {ADMIN_KEY}").parse().unwrap(),
        );

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::builder()
            .uri("/api/nothing-here")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
