//! Deletes every hosted preview image from the configured object storage.
//!
//! Links that pointed at a purged image keep rendering, just without
//! `og:image` dimensions.
//!
//! Usage: cargo run --bin purge-images

use fakelink_core::images::{BUCKET_NAME, ImageStore, S3ImageStore, S3StoreConfig};
use fakelink_shared::AppConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");
    let settings = config
        .storage
        .s3
        .expect("storage.s3 settings must be configured to purge images");

    println!("Connecting to {}:{}...", settings.host, settings.port);
    let store = S3ImageStore::connect(S3StoreConfig::from(settings))
        .await
        .expect("Failed to connect to object storage");

    println!("Deleting every object in {BUCKET_NAME}...");
    store.clear().await.expect("Failed to clear images");

    println!("Purge complete!");
}
