use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use storage::{
    Database,
    models::User,
    repository::user::UserRepository,
    services::workflow::Actor,
};

use crate::error::WebError;

/// Static keys accepted on the admin routes.
#[derive(Clone)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// The authenticated caller, stored in the request extensions by [`require_user`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.0.user_id, self.0.role)
    }

    pub fn ensure_student(&self) -> Result<&User, WebError> {
        if self.0.is_student() {
            Ok(&self.0)
        } else {
            Err(WebError::Forbidden(
                "Only students can perform this action".to_string(),
            ))
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_api_key(
    State(api_keys): State<ApiKeys>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let authorized = bearer_token(request.headers()).is_some_and(|key| api_keys.is_valid(key));

    if !authorized {
        tracing::warn!("Invalid API key attempt");
        return Err(WebError::Unauthorized);
    }

    Ok(next.run(request).await)
}

pub async fn require_user(
    State(db): State<Database>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        tracing::warn!("Missing bearer token");
        return Err(WebError::Unauthorized);
    };

    let user = UserRepository::new(db.pool())
        .find_by_token(&token)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Unknown user token");
            WebError::Unauthorized
        })?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Must run inside [`require_user`].
pub async fn require_reviewer(request: Request, next: Next) -> Result<Response, WebError> {
    let Some(current) = request.extensions().get::<CurrentUser>() else {
        return Err(WebError::Unauthorized);
    };

    if !current.0.is_reviewer() {
        tracing::warn!(user_id = %current.0.user_id, "Reviewer route refused");
        return Err(WebError::Forbidden(
            "Only teachers and admins can access this resource".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
