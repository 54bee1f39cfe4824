//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for creating and sharing link previews
//! - Error to response mapping
//! - Shared application state

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use fakelink_core::images::ImageStore;
use fakelink_core::links::LinkService;
use fakelink_core::preview::PreviewRenderer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState<S: ImageStore> {
    /// Link service over the configured image store.
    pub links: Arc<LinkService<S>>,
    /// HTML preview renderer.
    pub renderer: Arc<PreviewRenderer>,
}

impl<S: ImageStore> AppState<S> {
    /// Create state from an image store and a compiled renderer.
    #[must_use]
    pub fn new(images: S, renderer: PreviewRenderer) -> Self {
        Self {
            links: Arc::new(LinkService::new(images)),
            renderer: Arc::new(renderer),
        }
    }
}

// Derive would require `S: Clone`.
impl<S: ImageStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            links: Arc::clone(&self.links),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

/// Creates the main application router.
pub fn create_router<S: ImageStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
