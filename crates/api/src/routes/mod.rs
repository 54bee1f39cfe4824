//! API route definitions.

use axum::Router;
use fakelink_core::images::ImageStore;

use crate::AppState;

pub mod health;
pub mod links;

/// Creates the API router with all routes.
pub fn api_routes<S: ImageStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::routes())
        .merge(links::routes())
}
