//! S3-compatible object store client.
//!
//! Wraps the AWS SDK behind the handful of operations the services need:
//! prefix deletes, single-object deletes, presigned PUT URLs, and HTML
//! overlay put/get.

use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lectern_core::config::storage::StorageConfig;
use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;

/// A presigned upload URL plus the key the client must PUT to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedUpload {
    /// Time-limited URL granting direct PUT access.
    pub presigned_url: String,
    /// The object key the URL writes to.
    pub object_key: String,
}

/// Result of fetching a page's HTML overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlLayer {
    /// Overlay markup; empty when no overlay exists.
    pub html_content: String,
    /// Whether an overlay object was found.
    pub has_file: bool,
}

/// S3 object store client for the main and temp buckets.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    client: Client,
    bucket: String,
    temp_bucket: String,
    presign_expiry: Duration,
}

impl ObjectStore {
    /// Connect to the object store described by the configuration.
    pub async fn connect(config: &StorageConfig) -> AppResult<Self> {
        info!(
            region = %config.region,
            bucket = %config.bucket,
            temp_bucket = %config.temp_bucket,
            "Initializing S3 object store"
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "lectern-config",
            ));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if !config.endpoint.is_empty() {
            builder = builder
                .endpoint_url(config.endpoint.clone())
                .force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            temp_bucket: config.temp_bucket.clone(),
            presign_expiry: Duration::from_secs(config.presign_expiry_seconds),
        })
    }

    /// Delete every object under a key prefix (folder-delete semantics).
    ///
    /// An empty or missing prefix is not an error.
    pub async fn delete_prefix(&self, prefix: &str) -> AppResult<()> {
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to list objects under '{prefix}'"),
                    e,
                )
            })?;

            let identifiers: Vec<ObjectIdentifier> = response
                .contents()
                .iter()
                .filter_map(|object| object.key())
                .map(|key| {
                    ObjectIdentifier::builder().key(key).build().map_err(|e| {
                        AppError::with_source(ErrorKind::Storage, "Invalid object key", e)
                    })
                })
                .collect::<AppResult<_>>()?;

            if identifiers.is_empty() {
                debug!(prefix, "No objects under prefix, nothing to delete");
                return Ok(());
            }

            let delete = Delete::builder()
                .set_objects(Some(identifiers))
                .build()
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to build delete request", e)
                })?;

            self.client
                .delete_objects()
                .bucket(&self.bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to delete objects under '{prefix}'"),
                        e,
                    )
                })?;

            if response.is_truncated() == Some(true) {
                continuation = response.next_continuation_token().map(String::from);
            } else {
                debug!(prefix, "Prefix deleted");
                return Ok(());
            }
        }
    }

    /// Delete a single object. Deleting a missing key is not an error.
    pub async fn delete_object(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object '{key}'"),
                    e,
                )
            })?;
        Ok(())
    }

    /// Presigned PUT URL into the temp bucket for a raw PDF upload.
    ///
    /// The conversion worker reads the callback URL from object metadata
    /// once the upload lands.
    pub async fn presign_pdf_upload(
        &self,
        key: &str,
        file_size: u64,
        callback_url: &str,
    ) -> AppResult<PresignedUpload> {
        let presigning = PresigningConfig::expires_in(self.presign_expiry).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presign expiry", e)
        })?;

        let request = self
            .client
            .put_object()
            .bucket(&self.temp_bucket)
            .key(key)
            .content_type("application/pdf")
            .content_length(file_size as i64)
            .metadata("callback-url", callback_url)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to presign PDF upload", e)
            })?;

        Ok(PresignedUpload {
            presigned_url: request.uri().to_string(),
            object_key: key.to_string(),
        })
    }

    /// Presigned PUT URL into the main bucket for an audio upload.
    pub async fn presign_audio_upload(
        &self,
        key: &str,
        mime_type: &str,
        file_size: u64,
    ) -> AppResult<PresignedUpload> {
        let presigning = PresigningConfig::expires_in(self.presign_expiry).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presign expiry", e)
        })?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(mime_type)
            .content_length(file_size as i64)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to presign audio upload", e)
            })?;

        Ok(PresignedUpload {
            presigned_url: request.uri().to_string(),
            object_key: key.to_string(),
        })
    }

    /// Store a page's HTML overlay, replacing any previous one.
    pub async fn put_html_layer(&self, key: &str, html_content: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("text/html; charset=utf-8")
            .body(ByteStream::from(html_content.as_bytes().to_vec()))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to upload HTML layer '{key}'"),
                    e,
                )
            })?;
        Ok(())
    }

    /// Fetch a page's HTML overlay. A missing object is not an error.
    pub async fn get_html_layer(&self, key: &str) -> AppResult<HtmlLayer> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        let output = match response {
            Ok(output) => output,
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    return Ok(HtmlLayer {
                        html_content: String::new(),
                        has_file: false,
                    });
                }
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to fetch HTML layer '{key}'"),
                    service_err,
                ));
            }
        };

        let bytes = output.body.collect().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read HTML layer body", e)
        })?;

        let html_content = String::from_utf8(bytes.into_bytes().to_vec()).unwrap_or_else(|bad| {
            warn!(key, "HTML layer is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(bad.as_bytes()).into_owned()
        });

        Ok(HtmlLayer {
            html_content,
            has_file: true,
        })
    }
}
