//! Preview image storage.
//!
//! One contract, [`ImageStore`], with two interchangeable backends:
//! - [`InMemoryImageStore`] - process memory, for tests and local runs
//! - [`S3ImageStore`] - S3-compatible object storage (MinIO, AWS S3, R2)
//!
//! Images cross the object storage boundary as JPEG. `put` hands back a
//! browser-facing URL; `get` answers `None` for anything it cannot return.

mod codec;
mod config;
mod error;
mod memory;
mod s3;
mod store;

pub use codec::{JPEG_QUALITY, decode_jpeg, encode_jpeg};
pub use config::S3StoreConfig;
pub use error::StorageError;
pub use memory::{InMemoryImageStore, LOCAL_URL_BASE};
pub use s3::{BUCKET_NAME, S3ImageStore};
pub use store::ImageStore;
