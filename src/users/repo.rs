use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::User;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, bio, location, website, avatar, settings, created_at";

#[derive(Debug, Default)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

pub async fn update_profile(
    db: &PgPool,
    user_id: Uuid,
    patch: &ProfilePatch,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users SET
            username = COALESCE($2, username),
            bio = COALESCE($3, bio),
            location = COALESCE($4, location),
            website = COALESCE($5, website)
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&patch.username)
    .bind(&patch.bio)
    .bind(&patch.location)
    .bind(&patch.website)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn update_settings(
    db: &PgPool,
    user_id: Uuid,
    settings: &serde_json::Value,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE users SET settings = $2 WHERE id = $1")
        .bind(user_id)
        .bind(settings)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_password(db: &PgPool, user_id: Uuid, hash: &str) -> anyhow::Result<()> {
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(user_id)
        .bind(hash)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_avatar(db: &PgPool, user_id: Uuid, url: &str) -> anyhow::Result<()> {
    sqlx::query("UPDATE users SET avatar = $2 WHERE id = $1")
        .bind(user_id)
        .bind(url)
        .execute(db)
        .await?;
    Ok(())
}

/// Removes the account and everything it owns in one transaction.
pub async fn delete_account(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin tx")?;
    sqlx::query("DELETE FROM content WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await.context("commit tx")?;
    Ok(())
}
