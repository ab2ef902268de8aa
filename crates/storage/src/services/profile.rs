use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user::UpdateProfileRequest;
use crate::error::Result;
use crate::models::User;
use crate::repository::{change_log, user};

/// A single edited profile field, as recorded in the change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Apply `req` to a copy of `current`, returning the edited user and the
/// fields whose value actually changed.
pub fn apply_changes(current: &User, req: &UpdateProfileRequest) -> (User, Vec<FieldChange>) {
    let mut updated = current.clone();
    let mut changes = Vec::new();

    if let Some(full_name) = req.full_name.as_ref().filter(|v| **v != current.full_name) {
        changes.push(FieldChange {
            field: "full_name",
            old_value: Some(current.full_name.clone()),
            new_value: Some(full_name.clone()),
        });
        updated.full_name = full_name.clone();
    }

    let optional_fields: [(&'static str, &Option<String>, &mut Option<String>); 6] = [
        ("major", &req.major, &mut updated.major),
        ("grade", &req.grade, &mut updated.grade),
        ("class_name", &req.class_name, &mut updated.class_name),
        ("department", &req.department, &mut updated.department),
        ("email", &req.email, &mut updated.email),
        ("phone", &req.phone, &mut updated.phone),
    ];

    for (field, requested, target) in optional_fields {
        if let Some(value) = requested.as_ref().filter(|v| target.as_ref() != Some(*v)) {
            changes.push(FieldChange {
                field,
                old_value: target.clone(),
                new_value: Some(value.clone()),
            });
            *target = Some(value.clone());
        }
    }

    if let Some(rank_visible) = req.rank_visible.filter(|v| *v != current.rank_visible) {
        changes.push(FieldChange {
            field: "rank_visible",
            old_value: Some(current.rank_visible.to_string()),
            new_value: Some(rank_visible.to_string()),
        });
        updated.rank_visible = rank_visible;
    }

    (updated, changes)
}

/// Edit a profile and, for students, log each changed field against `editor_id`.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    editor_id: Uuid,
    req: &UpdateProfileRequest,
) -> Result<User> {
    let mut tx = pool.begin().await?;

    let current = user::lock_for_update(&mut tx, user_id).await?;
    let (updated, changes) = apply_changes(&current, req);

    if changes.is_empty() {
        tx.commit().await?;
        return Ok(current);
    }

    let saved = user::save_profile(&mut tx, &updated).await?;

    if saved.is_student() {
        for change in &changes {
            change_log::insert(&mut tx, user_id, editor_id, change).await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        %user_id,
        %editor_id,
        fields = changes.len(),
        "Profile updated"
    );

    Ok(saved)
}
