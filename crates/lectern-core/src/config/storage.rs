//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// S3 endpoint URL (empty for AWS, set for MinIO and friends).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Main bucket holding page images, audio, and HTML overlays.
    pub bucket: String,
    /// Temporary bucket receiving raw PDF uploads for conversion.
    pub temp_bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Presigned URL expiry in seconds.
    #[serde(default = "default_presign_expiry")]
    pub presign_expiry_seconds: u64,
    /// Maximum PDF upload size in bytes (default 50 MB).
    #[serde(default = "default_max_pdf")]
    pub max_pdf_size_bytes: u64,
    /// Maximum audio upload size in bytes (default 100 MB).
    #[serde(default = "default_max_audio")]
    pub max_audio_size_bytes: u64,
}

fn default_region() -> String {
    "ap-northeast-2".to_string()
}

fn default_presign_expiry() -> u64 {
    900
}

fn default_max_pdf() -> u64 {
    50 * 1024 * 1024
}

fn default_max_audio() -> u64 {
    100 * 1024 * 1024
}
