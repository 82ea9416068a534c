use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Router};
use time::{Duration, OffsetDateTime, Time};
use tracing::instrument;

use crate::{
    analytics::{
        dto::{
            ContentAnalyticsResponse, DashboardResponse, DashboardStats, DayActivity,
            MonthActivity, PlatformSlice, TypeSlice, UsageResponse,
        },
        services::{
            month_abbrev, month_start_back, next_month_start, round1, title_case, weekday_abbrev,
            weekday_full,
        },
    },
    auth::{extractors::AuthUser, repo_types::User},
    content::repo as content_repo,
    error::{ApiError, ApiResult},
    extract::Json,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/dashboard", get(dashboard))
        .route("/analytics/content", get(content_analytics))
        .route("/analytics/usage", get(usage))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found!".into()))?;

    let now = OffsetDateTime::now_utc();
    let today = now.date();

    let total_content = content_repo::count_all(&state.db, user_id).await?;
    let this_week = content_repo::count_since(&state.db, user_id, now - Duration::days(7)).await?;
    let platforms = content_repo::distinct_platform_count(&state.db, user_id).await?;

    let avg_per_day = if total_content > 0 {
        let days = (today - user.created_at.date()).whole_days() + 1;
        round1(total_content as f64 / days.max(1) as f64)
    } else {
        0.0
    };

    let platform_data = content_repo::platform_breakdown(&state.db, user_id)
        .await?
        .into_iter()
        .map(|(platform, value)| PlatformSlice {
            name: title_case(&platform),
            value,
        })
        .collect();

    // Fixed 7-day histogram ending today.
    let mut weekly_data = Vec::with_capacity(7);
    for i in 0..7 {
        let day = today - Duration::days(6 - i);
        let from = day.with_time(Time::MIDNIGHT).assume_utc();
        let count = content_repo::count_between(&state.db, user_id, from, from + Duration::days(1))
            .await?;
        weekly_data.push(DayActivity {
            day: weekday_abbrev(day.weekday()),
            content: count,
        });
    }

    Ok(Json(DashboardResponse {
        stats: DashboardStats {
            total_content,
            this_week,
            platforms,
            avg_per_day,
        },
        platform_data,
        weekly_data,
    }))
}

#[instrument(skip(state))]
pub async fn content_analytics(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ContentAnalyticsResponse>> {
    let type_data = content_repo::type_breakdown(&state.db, user_id)
        .await?
        .into_iter()
        .map(|(content_type, count)| TypeSlice {
            content_type: title_case(&content_type),
            count,
        })
        .collect();

    // Six calendar months walking back from the current month, oldest first.
    let today = OffsetDateTime::now_utc().date();
    let mut monthly_data = Vec::with_capacity(6);
    for back in (0..6).rev() {
        let start = month_start_back(today, back)?;
        let end = next_month_start(start)?;
        let count = content_repo::count_between(
            &state.db,
            user_id,
            start.with_time(Time::MIDNIGHT).assume_utc(),
            end.with_time(Time::MIDNIGHT).assume_utc(),
        )
        .await?;
        monthly_data.push(MonthActivity {
            month: month_abbrev(start.month()),
            content: count,
        });
    }

    Ok(Json(ContentAnalyticsResponse {
        type_data,
        monthly_data,
    }))
}

#[instrument(skip(state))]
pub async fn usage(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<UsageResponse>> {
    let timestamps = content_repo::created_timestamps(&state.db, user_id).await?;

    let mut day_breakdown: BTreeMap<&'static str, i64> = BTreeMap::new();
    for ts in &timestamps {
        *day_breakdown.entry(weekday_full(ts.weekday())).or_insert(0) += 1;
    }

    let most_productive_day = day_breakdown
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(day, _)| *day)
        .unwrap_or("Monday");

    Ok(Json(UsageResponse {
        most_productive_day,
        day_breakdown,
    }))
}
