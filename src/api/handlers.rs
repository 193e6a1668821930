// src/api/handlers.rs
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::error::ApiError;
use super::AppState;
use crate::application::dto::BookmarkPayload;
use crate::domain::bookmark::Bookmark;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Liveness probe
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Bookmarks API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/bookmarks",
    responses(
        (status = 200, description = "All bookmarks, ordered by id", body = [Bookmark]),
        (status = 500, description = "Internal server error", body = crate::api::error::ErrorBody)
    )
)]
#[instrument(skip_all, level = "debug")]
pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = state.bookmark_service.list_bookmarks().await?;
    Ok(Json(bookmarks))
}

#[utoipa::path(
    post,
    path = "/bookmarks",
    request_body = BookmarkPayload,
    responses(
        (status = 201, description = "Bookmark created; Location names the new resource", body = Bookmark),
        (status = 400, description = "Missing field or malformed JSON", body = crate::api::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::api::error::ErrorBody)
    )
)]
#[instrument(skip_all, level = "debug")]
pub async fn create_bookmark(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<BookmarkPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let created = state
        .bookmark_service
        .create_bookmark(uri.path(), payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.bookmark),
    ))
}

#[utoipa::path(
    get,
    path = "/bookmarks/{id}",
    params(("id" = i32, Path, description = "Bookmark id")),
    responses(
        (status = 200, description = "The bookmark with markup in its text fields sanitized", body = Bookmark),
        (status = 404, description = "Bookmark doesn't exist", body = crate::api::error::ErrorBody)
    )
)]
#[instrument(skip_all, level = "debug")]
pub async fn get_bookmark(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
) -> Json<Bookmark> {
    Json(state.bookmark_service.present_bookmark(bookmark))
}

#[utoipa::path(
    patch,
    path = "/bookmarks/{id}",
    params(("id" = i32, Path, description = "Bookmark id")),
    request_body = BookmarkPayload,
    responses(
        (status = 204, description = "Supplied fields written"),
        (status = 400, description = "No updatable field supplied or malformed JSON", body = crate::api::error::ErrorBody),
        (status = 404, description = "Bookmark doesn't exist", body = crate::api::error::ErrorBody)
    )
)]
#[instrument(skip_all, level = "debug")]
pub async fn update_bookmark(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
    payload: Result<Json<BookmarkPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    state
        .bookmark_service
        .update_bookmark(bookmark.id, payload)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/bookmarks/{id}",
    params(("id" = i32, Path, description = "Bookmark id")),
    responses(
        (status = 204, description = "Bookmark deleted"),
        (status = 404, description = "Bookmark doesn't exist", body = crate::api::error::ErrorBody)
    )
)]
#[instrument(skip_all, level = "debug")]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Extension(bookmark): Extension<Bookmark>,
) -> Result<StatusCode, ApiError> {
    state.bookmark_service.delete_bookmark(bookmark.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
