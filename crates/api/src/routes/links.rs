//! Link preview routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use fakelink_core::images::ImageStore;
use fakelink_core::links::LinkValues;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

/// Creates the link routes.
pub fn routes<S: ImageStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/links", post(create_link::<S>))
        .route("/links/random", get(random_link::<S>))
        .route("/links/{slug}", get(get_link::<S>))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a link.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// Open Graph values of the preview.
    #[serde(flatten)]
    pub values: LinkValues,
    /// Base64 encoded preview image to host under the link's slug.
    #[serde(default)]
    pub image_data: Option<String>,
}

/// Response for a created link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    /// Generated slug.
    pub slug: String,
    /// Path of the shareable preview page.
    pub preview_url: String,
    /// Image URL the preview advertises.
    pub image: Option<String>,
}

fn decode_image_data(data: &str) -> Result<DynamicImage, ApiError> {
    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| ApiError::bad_request(format!("image_data is not valid base64: {e}")))?;

    image::load_from_memory(&bytes)
        .map_err(|e| ApiError::bad_request(format!("image_data is not a supported image: {e}")))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/links`
async fn create_link<S: ImageStore + 'static>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image = payload
        .image_data
        .as_deref()
        .map(decode_image_data)
        .transpose()?;

    let link = state.links.create(payload.values, image).await?;

    let response = CreateLinkResponse {
        preview_url: format!("/links/{}", link.slug),
        slug: link.slug,
        image: link.values.image,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET `/links/random`
async fn random_link<S: ImageStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, ApiError> {
    let link = state.links.random();
    Ok(Html(state.renderer.render(&link.values, None)?))
}

/// GET `/links/{slug}`
async fn get_link<S: ImageStore + 'static>(
    State(state): State<AppState<S>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ApiError> {
    let link = state.links.get(&slug)?;

    let dimensions = state
        .links
        .hosted_image(&link)
        .await
        .map(|image| (image.width(), image.height()));

    Ok(Html(state.renderer.render(&link.values, dimensions)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use axum::body::Body;
    use axum::http::{Request, header};
    use fakelink_core::images::{InMemoryImageStore, StorageError};
    use fakelink_core::preview::PreviewRenderer;
    use http_body_util::BodyExt;
    use image::{ImageFormat, Rgb, RgbImage};
    use serde_json::{Value, json};
    use std::io::Cursor;
    use tower::ServiceExt;

    /// Store whose uploads always fail.
    struct UnreachableStore;

    impl ImageStore for UnreachableStore {
        async fn put(&self, _key: &str, _image: DynamicImage) -> Result<String, StorageError> {
            Err(StorageError::operation("connection refused"))
        }

        async fn get(&self, _key: &str) -> Option<DynamicImage> {
            None
        }

        async fn clear(&self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn app_with<S: ImageStore + 'static>(images: S) -> axum::Router {
        let renderer = PreviewRenderer::new().expect("template compiles");
        create_router(AppState::new(images, renderer))
    }

    fn png_base64(width: u32, height: u32) -> String {
        let image = RgbImage::from_pixel(width, height, Rgb([10, 200, 30]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("png encodes");
        BASE64.encode(bytes.into_inner())
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/links")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app_with(InMemoryImageStore::new())
            .oneshot(get("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_create_and_view_link_with_external_image() {
        let app = app_with(InMemoryImageStore::new());

        let response = app
            .clone()
            .oneshot(post_json(&json!({
                "title": "Kakapo.js",
                "type": "website",
                "url": "http://devlucky.github.io/kakapo-js",
                "image": "http://devlucky.github.io/assets/images/logo.png"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let slug = created["slug"].as_str().unwrap().to_string();
        assert_eq!(created["preview_url"], format!("/links/{slug}"));
        assert_eq!(created["image"], "http://devlucky.github.io/assets/images/logo.png");

        let response = app.oneshot(get(&format!("/links/{slug}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(r#"<meta property="og:title" content="Kakapo.js">"#));
        assert!(!html.contains("og:image:width"));
    }

    #[tokio::test]
    async fn test_create_with_image_data_hosts_image() {
        let app = app_with(InMemoryImageStore::new());

        let response = app
            .clone()
            .oneshot(post_json(&json!({
                "title": "Hosted",
                "url": "https://example.com/article",
                "image_data": png_base64(40, 30)
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let slug = created["slug"].as_str().unwrap().to_string();
        assert_eq!(created["image"], format!("http://127.0.0.1/{slug}"));

        let html = body_string(app.oneshot(get(&format!("/links/{slug}"))).await.unwrap()).await;
        assert!(html.contains(r#"<meta property="og:image:width" content="40">"#));
        assert!(html.contains(r#"<meta property="og:image:height" content="30">"#));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_base64() {
        let response = app_with(InMemoryImageStore::new())
            .oneshot(post_json(&json!({
                "title": "Broken",
                "url": "https://example.com",
                "image_data": "***not base64***"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_rejects_undecodable_image() {
        let response = app_with(InMemoryImageStore::new())
            .oneshot(post_json(&json!({
                "title": "Broken",
                "url": "https://example.com",
                "image_data": BASE64.encode(b"definitely not an image")
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_values() {
        let response = app_with(InMemoryImageStore::new())
            .oneshot(post_json(&json!({
                "title": "",
                "url": "https://example.com"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Validation error: title is required");
    }

    #[tokio::test]
    async fn test_storage_failure_is_bad_gateway() {
        let response = app_with(UnreachableStore)
            .oneshot(post_json(&json!({
                "title": "Hosted",
                "url": "https://example.com",
                "image_data": png_base64(2, 2)
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "STORAGE_ERROR");
        assert_eq!(body["message"], "Image storage is unavailable");
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let response = app_with(InMemoryImageStore::new())
            .oneshot(get("/links/nope1234"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_random_link_renders_showcase() {
        let response = app_with(InMemoryImageStore::new())
            .oneshot(get("/links/random"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("og:title"));
        assert!(html.contains("http-equiv=\"refresh\""));
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/links")
            .header(header::ORIGIN, "https://elsewhere.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app_with(InMemoryImageStore::new())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
