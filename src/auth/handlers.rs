use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{JwtKeys, LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
        repo_types::User,
        services::{
            hash_password, is_valid_email, sanitize_input, validate_password, verify_password,
            MAX_EMAIL_LEN, MAX_USERNAME_LEN,
        },
    },
    error::{ApiError, ApiResult},
    extract::Json,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let (Some(username), Some(email), Some(password)) =
        (payload.username, payload.email, payload.password)
    else {
        return Err(ApiError::Validation(
            "Missing username, email, or password".into(),
        ));
    };

    let username = sanitize_input(&username);
    let email = sanitize_input(&email).to_lowercase();

    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Missing username, email, or password".into(),
        ));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(ApiError::Validation(
            "Username must be 80 characters or less".into(),
        ));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ApiError::Validation(
            "Email must be 120 characters or less".into(),
        ));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email format".into()));
    }
    validate_password(&password).map_err(ApiError::Validation)?;

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict(
            "User with that email already exists".into(),
        ));
    }
    if User::find_by_username(&state.db, &username).await?.is_some() {
        warn!(username = %username, "username already taken");
        return Err(ApiError::Conflict("Username already exists".into()));
    }

    let hash = hash_password(&password)?;
    let user = User::create(&state.db, &username, &email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::Validation("Missing email or password".into()));
    };

    let email = sanitize_input(&email).to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Missing email or password".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email format".into()));
    }

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            ApiError::Unauthorized("Invalid credentials".into())
        })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
    }))
}

/// Stateless tokens: logout is client-side, this just acknowledges.
#[instrument]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logout successful".into(),
    })
}
