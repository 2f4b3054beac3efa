use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    bookmarks::{
        dto::{CreateBookmarkRequest, EditBookmarkRequest},
        repo_types::Bookmark,
    },
    error::ApiError,
    extract::ApiJson,
    state::AppState,
};

pub fn bookmark_routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/:id",
            get(get_bookmark)
                .patch(edit_bookmark)
                .delete(delete_bookmark),
        )
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = Bookmark::list_by_user(&state.db, user_id).await?;
    Ok(Json(bookmarks))
}

#[instrument(skip(state))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Bookmark>, ApiError> {
    let bookmark = Bookmark::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::BookmarkNotFound)?;
    // Someone else's bookmark reads as absent rather than forbidden.
    if bookmark.user_id != user_id {
        return Err(ApiError::BookmarkNotFound);
    }
    Ok(Json(bookmark))
}

#[instrument(skip(state, payload))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    payload.validate()?;
    let bookmark = Bookmark::create(
        &state.db,
        user_id,
        &payload.title,
        payload.description.as_deref(),
        &payload.link,
    )
    .await?;
    info!(bookmark_id = %bookmark.id, %user_id, "bookmark created");
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[instrument(skip(state, payload))]
pub async fn edit_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<EditBookmarkRequest>,
) -> Result<Json<Bookmark>, ApiError> {
    let existing = Bookmark::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::BookmarkNotFound)?;
    if existing.user_id != user_id {
        warn!(bookmark_id = %id, %user_id, "edit of foreign bookmark denied");
        return Err(ApiError::AccessDenied);
    }

    let updated = Bookmark::update(
        &state.db,
        id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.link.as_deref(),
    )
    .await?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let existing = Bookmark::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::BookmarkNotFound)?;
    if existing.user_id != user_id {
        warn!(bookmark_id = %id, %user_id, "delete of foreign bookmark denied");
        return Err(ApiError::AccessDenied);
    }

    Bookmark::delete(&state.db, id).await?;
    info!(bookmark_id = %id, %user_id, "bookmark deleted");
    Ok(StatusCode::NO_CONTENT)
}
