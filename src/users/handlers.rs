use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use time::{format_description::well_known::Rfc3339, OffsetDateTime, Time};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        extractors::AuthUser,
        repo_types::User,
        services::{hash_password, sanitize_input, validate_password, verify_password},
    },
    content::{
        dto::{PlatformCount, TypeCount},
        repo as content_repo,
    },
    error::{ApiError, ApiResult},
    extract::Json,
    state::AppState,
    users::{
        dto::{
            AvatarResponse, ChangePasswordRequest, ProfileResponse, ProfileStats, ProfileUser,
            SettingsEnvelope, UpdateProfileRequest, UserSettings, UserStatsResponse,
        },
        repo::{self, ProfilePatch},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(get_profile).put(update_profile))
        .route("/user/settings", get(get_settings).put(update_settings))
        .route("/user/change-password", post(change_password))
        .route("/user/avatar", post(upload_avatar))
        .route("/user/export", get(export_data))
        .route("/user/delete", delete(delete_account))
        .route("/user/stats", get(user_stats))
}

async fn load_user(state: &AppState, user_id: uuid::Uuid) -> ApiResult<User> {
    User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found!".into()))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let user = load_user(&state, user_id).await?;

    let total_content = content_repo::count_all(&state.db, user_id).await?;
    let platforms = content_repo::distinct_platform_count(&state.db, user_id).await?;

    let now = OffsetDateTime::now_utc();
    let month_start = now
        .replace_time(Time::MIDNIGHT)
        .replace_day(1)
        .map_err(|e| ApiError::Internal(e.into()))?;
    let this_month = content_repo::count_since(&state.db, user_id, month_start).await?;

    Ok(Json(ProfileResponse {
        user: ProfileUser {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio.unwrap_or_default(),
            location: user.location.unwrap_or_default(),
            website: user.website.unwrap_or_default(),
            avatar: user.avatar.unwrap_or_default(),
            join_date: user.created_at,
            stats: ProfileStats {
                total_content,
                platforms,
                this_month,
            },
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let username = payload.username.map(|u| sanitize_input(&u));

    if let Some(ref name) = username {
        if name.is_empty() {
            return Err(ApiError::Validation("Username cannot be empty".into()));
        }
        if let Some(existing) = User::find_by_username(&state.db, name).await? {
            if existing.id != user_id {
                warn!(username = %name, "username already taken");
                return Err(ApiError::Conflict("Username already taken".into()));
            }
        }
    }

    let patch = ProfilePatch {
        username,
        bio: payload.bio.map(|v| sanitize_input(&v)),
        location: payload.location.map(|v| sanitize_input(&v)),
        website: payload.website.map(|v| sanitize_input(&v)),
    };

    repo::update_profile(&state.db, user_id, &patch)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found!".into()))?;

    info!(user_id = %user_id, "profile updated");
    Ok(Json(json!({ "message": "Profile updated successfully" })))
}

#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<SettingsEnvelope>> {
    let user = load_user(&state, user_id).await?;

    // Stored blobs from older versions deserialize leniently; anything
    // unreadable falls back to defaults.
    let settings = user
        .settings
        .and_then(|v| serde_json::from_value::<UserSettings>(v).ok())
        .unwrap_or_default();

    Ok(Json(SettingsEnvelope { settings }))
}

#[instrument(skip(state, payload))]
pub async fn update_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UserSettings>,
) -> ApiResult<Json<serde_json::Value>> {
    let settings = payload.normalize();
    let value = serde_json::to_value(&settings).map_err(|e| ApiError::Internal(e.into()))?;
    repo::update_settings(&state.db, user_id, &value).await?;

    info!(user_id = %user_id, "settings updated");
    Ok(Json(json!({ "message": "Settings updated successfully" })))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let (Some(current), Some(new)) = (payload.current_password, payload.new_password) else {
        return Err(ApiError::Validation(
            "Current and new passwords are required".into(),
        ));
    };

    let user = load_user(&state, user_id).await?;
    if !verify_password(&current, &user.password_hash)? {
        return Err(ApiError::Validation(
            "Current password is incorrect".into(),
        ));
    }
    validate_password(&new).map_err(ApiError::Validation)?;

    let hash = hash_password(&new)?;
    repo::update_password(&state.db, user_id, &hash).await?;

    info!(user_id = %user_id, "password changed");
    Ok(Json(json!({ "message": "Password changed successfully" })))
}

#[instrument(skip(state, multipart))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<AvatarResponse>> {
    let mut avatar_url: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("avatar") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| ApiError::Validation("No file selected".into()))?;
        // The file body itself is not persisted; only the derived URL is
        // recorded on the user row.
        let _ = field.bytes().await;
        avatar_url = Some(format!("/static/avatars/{user_id}_{filename}"));
    }

    let url = avatar_url.ok_or_else(|| ApiError::Validation("No avatar file provided".into()))?;
    repo::update_avatar(&state.db, user_id, &url).await?;

    info!(user_id = %user_id, "avatar updated");
    Ok(Json(AvatarResponse {
        message: "Avatar uploaded successfully".into(),
        avatar_url: url,
    }))
}

#[instrument(skip(state))]
pub async fn export_data(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<axum::response::Response> {
    let user = load_user(&state, user_id).await?;
    let content = content_repo::list_all(&state.db, user_id).await?;
    let total_content = content.len();

    let doc = json!({
        "user": {
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "bio": user.bio.unwrap_or_default(),
            "location": user.location.unwrap_or_default(),
            "website": user.website.unwrap_or_default(),
            "created_at": user.created_at.format(&Rfc3339).map_err(|e| ApiError::Internal(e.into()))?,
        },
        "content": content,
        "export_info": {
            "export_date": OffsetDateTime::now_utc().format(&Rfc3339).map_err(|e| ApiError::Internal(e.into()))?,
            "total_content": total_content,
            "version": "1.0",
        },
    });

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=socialspark_data_export.json",
        )],
        Json(doc),
    )
        .into_response())
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    repo::delete_account(&state.db, user_id).await?;
    info!(user_id = %user_id, "account deleted");
    Ok(Json(json!({ "message": "Account deleted successfully" })))
}

#[instrument(skip(state))]
pub async fn user_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<UserStatsResponse>> {
    let user = load_user(&state, user_id).await?;

    let total = content_repo::count_all(&state.db, user_id).await?;
    let week_ago = OffsetDateTime::now_utc() - time::Duration::days(7);
    let recent = content_repo::count_since(&state.db, user_id, week_ago).await?;
    let platforms = content_repo::platform_breakdown(&state.db, user_id).await?;
    let types = content_repo::type_breakdown(&state.db, user_id).await?;
    let account_age_days = (OffsetDateTime::now_utc() - user.created_at).whole_days();

    Ok(Json(UserStatsResponse {
        total_content: total,
        recent_activity: recent,
        platform_usage: platforms
            .into_iter()
            .map(|(platform, count)| PlatformCount { platform, count })
            .collect(),
        type_usage: types
            .into_iter()
            .map(|(content_type, count)| TypeCount {
                content_type,
                count,
            })
            .collect(),
        account_age_days,
    }))
}
