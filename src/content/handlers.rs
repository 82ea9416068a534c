use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{extractors::AuthUser, repo_types::User},
    content::{
        dto::{
            list_offset, ContentEnvelope, ContentListEnvelope, ContentStatsResponse, ExportQuery,
            ListQuery, ListResponse, PaginationMeta, PlatformCount, RecentQuery,
            SaveContentRequest, SavedResponse, TypeCount, UpdateContentRequest,
        },
        repo,
        repo_types::{ContentFilter, ContentPatch, NewContent},
        services,
    },
    error::{ApiError, ApiResult},
    extract::{Json, Path, Query},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/content/save", post(save_content))
        .route("/content/saved", get(list_saved))
        .route("/content/recent", get(recent_content))
        .route("/content/export", get(export_content))
        .route("/content/stats", get(content_stats))
        .route(
            "/content/:id",
            get(get_content).put(update_content).delete(delete_content),
        )
}

#[instrument(skip(state, payload))]
pub async fn save_content(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SaveContentRequest>,
) -> ApiResult<(StatusCode, Json<SavedResponse>)> {
    let require = |field: Option<String>, name: &str| {
        field
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Validation(format!("Missing required field: {name}")))
    };
    let new = NewContent {
        body: require(payload.content, "content")?,
        platform: require(payload.platform, "platform")?,
        content_type: require(payload.content_type, "content_type")?,
        topic: require(payload.topic, "topic")?,
        tone: payload.tone.unwrap_or_else(|| "casual".into()),
        style: payload.style.unwrap_or_else(|| "engaging".into()),
        keywords: payload.keywords.unwrap_or_default(),
    };

    let item = repo::create(&state.db, user_id, &new).await?;
    info!(user_id = %user_id, content_id = %item.id, "content saved");

    Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
            message: "Content saved successfully".into(),
            content: item,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_saved(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<ListQuery>,
) -> ApiResult<Json<ListResponse>> {
    let page = q.page.max(1);
    let per_page = q.per_page.clamp(1, 100);

    let filter = ContentFilter {
        platform: q.platform,
        content_type: q.content_type,
        search: q.search,
    };

    let total = repo::count(&state.db, user_id, &filter).await?;
    let offset = list_offset(page, per_page);
    let items = repo::list(&state.db, user_id, &filter, per_page, offset).await?;

    Ok(Json(ListResponse {
        content: items,
        pagination: PaginationMeta::new(page, per_page, total),
    }))
}

#[instrument(skip(state))]
pub async fn recent_content(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RecentQuery>,
) -> ApiResult<Json<ContentListEnvelope>> {
    let limit = q.limit.clamp(1, 50);
    let items = repo::recent(&state.db, user_id, limit).await?;
    Ok(Json(ContentListEnvelope { content: items }))
}

#[instrument(skip(state))]
pub async fn get_content(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ContentEnvelope>> {
    let item = repo::find(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Content not found".into()))?;
    Ok(Json(ContentEnvelope { content: item }))
}

#[instrument(skip(state, payload))]
pub async fn update_content(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContentRequest>,
) -> ApiResult<Json<SavedResponse>> {
    let patch = ContentPatch {
        topic: payload.topic,
        body: payload.content,
        platform: payload.platform,
        content_type: payload.content_type,
        tone: payload.tone,
        style: payload.style,
        keywords: payload.keywords,
    };

    let item = repo::update(&state.db, user_id, id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Content not found".into()))?;

    info!(user_id = %user_id, content_id = %id, "content updated");
    Ok(Json(SavedResponse {
        message: "Content updated successfully".into(),
        content: item,
    }))
}

#[instrument(skip(state))]
pub async fn delete_content(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = repo::delete(&state.db, user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Content not found".into()));
    }
    info!(user_id = %user_id, content_id = %id, "content deleted");
    Ok(Json(
        serde_json::json!({ "message": "Content deleted successfully" }),
    ))
}

#[instrument(skip(state))]
pub async fn export_content(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<ExportQuery>,
) -> ApiResult<axum::response::Response> {
    let items = repo::list_all(&state.db, user_id).await?;

    match q.format.to_lowercase().as_str() {
        "json" => {
            let user = User::find_by_id(&state.db, user_id)
                .await?
                .ok_or_else(|| ApiError::Unauthorized("User not found!".into()))?;
            let doc = services::export_json(&user.username, &items)?;
            Ok((
                [(
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=content_export.json",
                )],
                Json(doc),
            )
                .into_response())
        }
        "csv" => {
            let body = services::content_csv(&items)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=content_export.csv",
                    ),
                ],
                body,
            )
                .into_response())
        }
        _ => Err(ApiError::Validation("Unsupported export format".into())),
    }
}

#[instrument(skip(state))]
pub async fn content_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ContentStatsResponse>> {
    let total = repo::count_all(&state.db, user_id).await?;
    let week_ago = time::OffsetDateTime::now_utc() - time::Duration::days(7);
    let recent = repo::count_since(&state.db, user_id, week_ago).await?;
    let platforms = repo::platform_breakdown(&state.db, user_id).await?;
    let types = repo::type_breakdown(&state.db, user_id).await?;

    Ok(Json(ContentStatsResponse {
        total_content: total,
        recent_content: recent,
        platform_breakdown: platforms
            .into_iter()
            .map(|(platform, count)| PlatformCount { platform, count })
            .collect(),
        type_breakdown: types
            .into_iter()
            .map(|(content_type, count)| TypeCount {
                content_type,
                count,
            })
            .collect(),
    }))
}
