// src/api/middleware.rs
use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, instrument};

use super::error::ApiError;
use super::AppState;

/// Resolve `:id` once for every item route.
///
/// Unknown or unparsable ids end the request with 404. Otherwise the stored
/// [`Bookmark`](crate::domain::bookmark::Bookmark) is put into the request extensions.
#[instrument(skip(state, request, next), level = "debug")]
pub async fn resolve_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Ok(id) = id.parse::<i32>() else {
        debug!("Rejecting non-numeric bookmark id");
        return Err(ApiError::NotFound);
    };

    let bookmark = state.bookmark_service.resolve_bookmark(id).await?;
    request.extensions_mut().insert(bookmark);

    Ok(next.run(request).await)
}
