//! S3-compatible image store.
//!
//! Object reads and writes go through an OpenDAL operator rooted at the
//! bucket. Bucket administration (existence check, creation, bulk delete) is
//! not part of OpenDAL's API, so those calls use the AWS SDK client against the
//! same endpoint.
//!
//! ```text
//! put(key, img) ──encode_jpeg──▶ op.write("key", bytes) ──▶ {public_url}/link-images/{key}
//! get(key)      ◀─decode_jpeg─── op.read("key")
//! clear()       ──▶ list_objects_v2 ──▶ delete_objects (one batch per page)
//! ```

use std::future::Future;
use std::time::Duration;

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use image::DynamicImage;
use opendal::{Operator, services};
use tracing::{debug, info, warn};

use super::codec::{decode_jpeg, encode_jpeg};
use super::config::S3StoreConfig;
use super::error::StorageError;
use super::store::ImageStore;

/// The single bucket holding every preview image.
pub const BUCKET_NAME: &str = "link-images";

/// Image store backed by an S3-compatible object storage service.
#[derive(Debug)]
pub struct S3ImageStore {
    operator: Operator,
    client: aws_sdk_s3::Client,
    public_url: String,
    timeout: Duration,
}

impl S3ImageStore {
    /// Connect to the configured endpoint and make sure the bucket exists.
    ///
    /// The bucket is created only when the backend reports it missing. The
    /// store is unusable without it, so callers should treat an error here as
    /// a startup failure.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the clients cannot be built
    /// and [`StorageError::Bucket`] if the bucket cannot be verified or created.
    pub async fn connect(config: S3StoreConfig) -> Result<Self, StorageError> {
        let endpoint = config.endpoint();

        let builder = services::S3::default()
            .endpoint(&endpoint)
            .bucket(BUCKET_NAME)
            .access_key_id(&config.access_key)
            .secret_access_key(&config.secret_key)
            .region(S3StoreConfig::REGION)
            .disable_config_load()
            .disable_ec2_metadata();
        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&endpoint)
            .region(Region::new(S3StoreConfig::REGION))
            .credentials_provider(Credentials::new(
                &config.access_key,
                &config.secret_key,
                None,
                None,
                "fakelink",
            ))
            .force_path_style(true)
            .build();

        let store = Self {
            operator,
            client: aws_sdk_s3::Client::from_conf(sdk_config),
            public_url: config.public_url_base().to_string(),
            timeout: config.timeout,
        };

        store.ensure_bucket().await?;
        info!(endpoint = %endpoint, bucket = BUCKET_NAME, "Image bucket ready");

        Ok(store)
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &'static str {
        BUCKET_NAME
    }

    /// URL browsers use to load the image stored under `key`.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{BUCKET_NAME}/{key}", self.public_url)
    }

    /// Fetch and decode the image under `key`, keeping the failure reason.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] for a missing object, and
    /// `Timeout`, `Operation` or `Decode` when the backend or the stored bytes
    /// are at fault.
    pub async fn try_get(&self, key: &str) -> Result<DynamicImage, StorageError> {
        let buffer = self
            .bounded("get object", async {
                self.operator.read(key).await.map_err(|e| {
                    if e.kind() == opendal::ErrorKind::NotFound {
                        StorageError::not_found(key)
                    } else {
                        StorageError::from(e)
                    }
                })
            })
            .await?;

        decode_jpeg(&buffer.to_vec())
    }

    async fn ensure_bucket(&self) -> Result<(), StorageError> {
        let head = self
            .bounded("head bucket", async {
                Ok(self.client.head_bucket().bucket(BUCKET_NAME).send().await)
            })
            .await
            .map_err(|e| StorageError::bucket(BUCKET_NAME, e.to_string()))?;

        match head {
            Ok(_) => {
                debug!(bucket = BUCKET_NAME, "Bucket already exists");
                return Ok(());
            }
            Err(err) if is_missing_bucket(&err) => {
                info!(bucket = BUCKET_NAME, "Bucket not found, creating it");
            }
            Err(err) => {
                return Err(StorageError::bucket(
                    BUCKET_NAME,
                    DisplayErrorContext(&err).to_string(),
                ));
            }
        }

        let created = self
            .bounded("create bucket", async {
                Ok(self.client.create_bucket().bucket(BUCKET_NAME).send().await)
            })
            .await
            .map_err(|e| StorageError::bucket(BUCKET_NAME, e.to_string()))?;

        match created {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_bucket_already_owned_by_you()) =>
            {
                debug!(bucket = BUCKET_NAME, "Bucket was created concurrently");
                Ok(())
            }
            Err(err) => Err(StorageError::bucket(
                BUCKET_NAME,
                DisplayErrorContext(&err).to_string(),
            )),
        }
    }

    async fn delete_batch(&self, batch: Delete) -> Result<(), StorageError> {
        let output = self
            .bounded("delete objects", async {
                self.client
                    .delete_objects()
                    .bucket(BUCKET_NAME)
                    .delete(batch)
                    .send()
                    .await
                    .map_err(|e| {
                        StorageError::operation(format!(
                            "failed to delete objects: {}",
                            DisplayErrorContext(&e)
                        ))
                    })
            })
            .await?;

        if let Some(failed) = output.errors().first() {
            return Err(StorageError::operation(format!(
                "failed to delete {} object(s), first was {:?}: {}",
                output.errors().len(),
                failed.key().unwrap_or_default(),
                failed.message().unwrap_or("unknown error"),
            )));
        }

        Ok(())
    }

    /// Run a remote call under the configured timeout.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StorageError::timeout(operation, self.timeout))?
    }
}

impl ImageStore for S3ImageStore {
    async fn put(&self, key: &str, image: DynamicImage) -> Result<String, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let bytes = encode_jpeg(&image)?;
        let size = bytes.len();

        self.bounded("put object", async {
            self.operator
                .write(key, bytes)
                .await
                .map(|_| ())
                .map_err(StorageError::from)
        })
        .await?;

        debug!(key, size, "Uploaded image");
        Ok(self.public_url(key))
    }

    async fn get(&self, key: &str) -> Option<DynamicImage> {
        match self.try_get(key).await {
            Ok(image) => Some(image),
            Err(StorageError::NotFound { .. }) => {
                debug!(key, "Image not found");
                None
            }
            Err(e @ StorageError::Decode(_)) => {
                warn!(key, error = %e, "Unexpected error decoding image retrieved from S3");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Unexpected error retrieving image from S3");
                None
            }
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut continuation: Option<String> = None;
        let mut deleted = 0usize;

        loop {
            let token = continuation.take();
            let page = self
                .bounded("list objects", async {
                    self.client
                        .list_objects_v2()
                        .bucket(BUCKET_NAME)
                        .set_continuation_token(token)
                        .send()
                        .await
                        .map_err(|e| {
                            StorageError::operation(format!(
                                "failed to list objects: {}",
                                DisplayErrorContext(&e)
                            ))
                        })
                })
                .await?;

            let keys: Vec<String> = page
                .contents()
                .iter()
                .filter_map(|object| object.key())
                .map(str::to_string)
                .collect();

            if let Some(batch) = deletion_batch(&keys)? {
                self.delete_batch(batch).await?;
                deleted += keys.len();
            }

            match page.next_continuation_token() {
                Some(next) => continuation = Some(next.to_string()),
                None => break,
            }
        }

        info!(bucket = BUCKET_NAME, deleted, "Cleared image bucket");
        Ok(())
    }
}

/// Build one bulk-delete request body holding exactly `keys`.
///
/// Returns `None` for an empty listing so no request is sent at all.
fn deletion_batch(keys: &[String]) -> Result<Option<Delete>, StorageError> {
    if keys.is_empty() {
        return Ok(None);
    }

    let objects = keys
        .iter()
        .map(|key| ObjectIdentifier::builder().key(key).build())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::operation(e.to_string()))?;

    Delete::builder()
        .set_objects(Some(objects))
        .quiet(true)
        .build()
        .map(Some)
        .map_err(|e| StorageError::operation(e.to_string()))
}

fn is_missing_bucket(err: &SdkError<HeadBucketError, HttpResponse>) -> bool {
    err.as_service_error()
        .is_some_and(HeadBucketError::is_not_found)
        || err
            .raw_response()
            .is_some_and(|response| response.status().as_u16() == 404)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_builds_no_batch() {
        let batch = deletion_batch(&[]).expect("should build");
        assert!(batch.is_none());
    }

    #[test]
    fn test_batch_holds_exactly_the_listed_keys() {
        let keys = vec!["abc".to_string(), "xyz".to_string()];

        let batch = deletion_batch(&keys)
            .expect("should build")
            .expect("non-empty listing builds a batch");

        let batched: Vec<&str> = batch.objects().iter().map(ObjectIdentifier::key).collect();
        assert_eq!(batched, vec!["abc", "xyz"]);
        assert!(batched.iter().all(|key| !key.is_empty()));
    }

    #[test]
    fn test_batch_is_quiet() {
        let batch = deletion_batch(&["abc".to_string()])
            .expect("should build")
            .expect("non-empty listing builds a batch");
        assert_eq!(batch.quiet(), Some(true));
    }
}
