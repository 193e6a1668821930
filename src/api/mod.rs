// src/api/mod.rs
//! HTTP binding for the bookmark service.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::application::dto::BookmarkPayload;
use crate::application::services::bookmark_service::BookmarkService;
use crate::domain::bookmark::Bookmark;
use crate::infrastructure::di::ServiceContainer;
use error::{ErrorBody, ErrorMessage};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub bookmark_service: Arc<dyn BookmarkService>,
}

impl AppState {
    pub fn new(bookmark_service: Arc<dyn BookmarkService>) -> Self {
        Self { bookmark_service }
    }
}

impl From<&ServiceContainer> for AppState {
    fn from(container: &ServiceContainer) -> Self {
        Self::new(container.bookmark_service.clone())
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_bookmarks,
        handlers::create_bookmark,
        handlers::get_bookmark,
        handlers::update_bookmark,
        handlers::delete_bookmark,
    ),
    components(schemas(Bookmark, BookmarkPayload, ErrorBody, ErrorMessage))
)]
pub struct ApiDoc;

/// OpenAPI document with the resource prefix as its server base
pub fn api_doc(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let base = if api_prefix.is_empty() { "/" } else { api_prefix };
    doc.servers = Some(vec![Server::new(base)]);
    doc
}

/// Build the application router. `api_prefix` must already be normalised
/// (leading '/', no trailing '/', empty for the root).
pub fn build_router(state: AppState, api_prefix: &str) -> Router {
    let collection_path = format!("{}/bookmarks", api_prefix);
    let item_path = format!("{}/bookmarks/:id", api_prefix);
    let doc = api_doc(api_prefix);

    let item_routes = Router::new()
        .route(
            &item_path,
            get(handlers::get_bookmark)
                .patch(handlers::update_bookmark)
                .delete(handlers::delete_bookmark),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::resolve_bookmark,
        ));

    Router::new()
        .route(
            &collection_path,
            get(handlers::list_bookmarks).post(handlers::create_bookmark),
        )
        .merge(item_routes)
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
