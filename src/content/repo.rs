use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::content::repo_types::{ContentFilter, ContentItem, ContentPatch, NewContent};

const COLUMNS: &str =
    "id, user_id, topic, body, platform, content_type, tone, style, keywords, created_at, updated_at";

pub async fn create(db: &PgPool, user_id: Uuid, new: &NewContent) -> anyhow::Result<ContentItem> {
    let item = sqlx::query_as::<_, ContentItem>(&format!(
        r#"
        INSERT INTO content (user_id, topic, body, platform, content_type, tone, style, keywords)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&new.topic)
    .bind(&new.body)
    .bind(&new.platform)
    .bind(&new.content_type)
    .bind(&new.tone)
    .bind(&new.style)
    .bind(&new.keywords)
    .fetch_one(db)
    .await?;
    Ok(item)
}

pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<ContentItem>> {
    let item = sqlx::query_as::<_, ContentItem>(&format!(
        "SELECT {COLUMNS} FROM content WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

// Filters are expressed as NULL-tolerant predicates so the query stays static.
const FILTER_CLAUSE: &str = r#"
    user_id = $1
    AND ($2::text IS NULL OR platform = $2)
    AND ($3::text IS NULL OR content_type = $3)
    AND ($4::text IS NULL
         OR topic ILIKE '%' || $4 || '%'
         OR body ILIKE '%' || $4 || '%'
         OR keywords ILIKE '%' || $4 || '%')
"#;

pub async fn list(
    db: &PgPool,
    user_id: Uuid,
    filter: &ContentFilter,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<ContentItem>> {
    let rows = sqlx::query_as::<_, ContentItem>(&format!(
        r#"
        SELECT {COLUMNS} FROM content
        WHERE {FILTER_CLAUSE}
        ORDER BY created_at DESC
        LIMIT $5 OFFSET $6
        "#
    ))
    .bind(user_id)
    .bind(&filter.platform)
    .bind(&filter.content_type)
    .bind(&filter.search)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count(db: &PgPool, user_id: Uuid, filter: &ContentFilter) -> anyhow::Result<i64> {
    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM content WHERE {FILTER_CLAUSE}"
    ))
    .bind(user_id)
    .bind(&filter.platform)
    .bind(&filter.content_type)
    .bind(&filter.search)
    .fetch_one(db)
    .await?;
    Ok(total)
}

pub async fn recent(db: &PgPool, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<ContentItem>> {
    let rows = sqlx::query_as::<_, ContentItem>(&format!(
        r#"
        SELECT {COLUMNS} FROM content
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_all(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ContentItem>> {
    let rows = sqlx::query_as::<_, ContentItem>(&format!(
        "SELECT {COLUMNS} FROM content WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Applies only the supplied fields and refreshes `updated_at`.
/// Returns None when the item does not exist or belongs to someone else.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &ContentPatch,
) -> anyhow::Result<Option<ContentItem>> {
    let item = sqlx::query_as::<_, ContentItem>(&format!(
        r#"
        UPDATE content SET
            topic = COALESCE($3, topic),
            body = COALESCE($4, body),
            platform = COALESCE($5, platform),
            content_type = COALESCE($6, content_type),
            tone = COALESCE($7, tone),
            style = COALESCE($8, style),
            keywords = COALESCE($9, keywords),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(&patch.topic)
    .bind(&patch.body)
    .bind(&patch.platform)
    .bind(&patch.content_type)
    .bind(&patch.tone)
    .bind(&patch.style)
    .bind(&patch.keywords)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM content WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

// --- aggregation queries shared with the users and analytics modules ---

pub async fn count_all(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await?;
    Ok(n)
}

pub async fn count_since(
    db: &PgPool,
    user_id: Uuid,
    since: OffsetDateTime,
) -> anyhow::Result<i64> {
    let n: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM content WHERE user_id = $1 AND created_at >= $2")
            .bind(user_id)
            .bind(since)
            .fetch_one(db)
            .await?;
    Ok(n)
}

pub async fn count_between(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<i64> {
    let n: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM content WHERE user_id = $1 AND created_at >= $2 AND created_at < $3",
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_one(db)
    .await?;
    Ok(n)
}

pub async fn platform_breakdown(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT platform, COUNT(*) FROM content WHERE user_id = $1 GROUP BY platform",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn type_breakdown(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT content_type, COUNT(*) FROM content WHERE user_id = $1 GROUP BY content_type",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn distinct_platform_count(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let n: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT platform) FROM content WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;
    Ok(n)
}

pub async fn created_timestamps(
    db: &PgPool,
    user_id: Uuid,
) -> anyhow::Result<Vec<OffsetDateTime>> {
    let rows: Vec<(OffsetDateTime,)> =
        sqlx::query_as("SELECT created_at FROM content WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(db)
            .await?;
    Ok(rows.into_iter().map(|(t,)| t).collect())
}
