use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{SignInRequest, SignUpRequest, SignUpResponse, TokenResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::User,
    },
    error::ApiError,
    extract::ApiJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), ApiError> {
    payload.validate()?;

    if User::find_user_id_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "signup email already in use");
        return Err(ApiError::DuplicateEmail);
    }
    if User::find_user_id_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "signup username already in use");
        return Err(ApiError::DuplicateUsername);
    }

    let user_id = Uuid::new_v4();
    let hash = hash_password(&payload.password)?;

    // Partial failure rolls back inside the repo and propagates here; the
    // handler never reports success unless all three writes landed.
    User::create(&state.db, user_id, &payload.username, &payload.email, &hash).await?;

    info!(%user_id, username = %payload.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User registered successfully!",
            user_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignInRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.validate()?;

    let user_id = User::find_user_id_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "signin unknown email");
            ApiError::UserNotFound
        })?;

    // The lookup hit, so a missing record here means the tables disagree.
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::Integrity(user_id))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%user_id, "signin password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.user_id, &user.email)?;

    info!(%user_id, "user signed in");
    Ok(Json(TokenResponse { access_token }))
}
