use axum::{extract::State, routing::post, Router};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ApiResult},
    extract::Json,
    generate::{
        dto::{
            CtaRequest, CtaResponse, GenerateContentRequest, GeneratedContentResponse,
            OptimizeRequest, SeoRequest, SeoResponse,
        },
        prompt::PromptParams,
        services::{self, OptimizeReport, MAX_VARIATIONS},
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate/content", post(generate_content))
        .route("/generate/analyze-seo", post(analyze_seo))
        .route("/generate/cta-suggestions", post(cta_suggestions))
        .route("/generate/optimize-content", post(optimize_content))
}

#[instrument(skip(state, payload))]
pub async fn generate_content(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<GenerateContentRequest>,
) -> ApiResult<Json<GeneratedContentResponse>> {
    let (Some(topic), Some(keywords), Some(content_type), Some(platform)) = (
        payload.topic,
        payload.keywords,
        payload.content_type,
        payload.platform,
    ) else {
        return Err(ApiError::Validation(
            "Missing required content generation parameters".into(),
        ));
    };

    if topic.len() > 500 {
        return Err(ApiError::Validation(
            "Topic must be 500 characters or less".into(),
        ));
    }
    if keywords.len() > 200 {
        return Err(ApiError::Validation(
            "Keywords must be 200 characters or less".into(),
        ));
    }
    if payload.style.len() > 100 {
        return Err(ApiError::Validation(
            "Style must be 100 characters or less".into(),
        ));
    }
    if payload.num_variations < 1 || payload.num_variations > MAX_VARIATIONS as i64 {
        return Err(ApiError::Validation(
            "Number of variations must be between 1 and 5".into(),
        ));
    }

    let params = PromptParams {
        topic: &topic,
        keywords: &keywords,
        content_type: &content_type,
        platform: &platform,
        tone: &payload.tone,
        style: &payload.style,
    };
    let generated_texts = services::generate_variations(
        state.generator.as_ref(),
        &params,
        payload.num_variations as usize,
    )
    .await;

    Ok(Json(GeneratedContentResponse { generated_texts }))
}

#[instrument(skip(state, payload))]
pub async fn analyze_seo(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<SeoRequest>,
) -> ApiResult<Json<SeoResponse>> {
    let content = payload
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Validation("Content is required for SEO analysis".into()))?;

    let analysis = services::analyze_seo(&content, &payload.keywords);
    let hashtag_suggestions =
        services::suggest_hashtags(state.generator.as_ref(), &content, &payload.keywords).await;

    Ok(Json(SeoResponse {
        analysis,
        hashtag_suggestions,
    }))
}

#[instrument(skip(state, payload))]
pub async fn cta_suggestions(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CtaRequest>,
) -> ApiResult<Json<CtaResponse>> {
    let suggested_ctas = services::cta_suggestions(&payload.platform, &payload.content_type);

    let custom_cta = if payload.topic.is_empty() {
        None
    } else {
        services::custom_cta(
            state.generator.as_ref(),
            &payload.platform,
            &payload.content_type,
            &payload.topic,
        )
        .await
    };

    Ok(Json(CtaResponse {
        platform: payload.platform,
        content_type: payload.content_type,
        suggested_ctas,
        custom_cta,
    }))
}

#[instrument(skip(state, payload))]
pub async fn optimize_content(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<OptimizeRequest>,
) -> ApiResult<Json<OptimizeReport>> {
    let content = payload
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Validation("Content is required for optimization".into()))?;

    let report = services::optimize(&content, &payload.platform, &payload.keywords);
    Ok(Json(report))
}
