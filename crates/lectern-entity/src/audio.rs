//! Audio attachment entity: narration clips attached to a page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An audio clip attached to a content page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Audio {
    /// Unique audio identifier.
    pub id: Uuid,
    /// Opaque key naming this clip's object-store location.
    pub audio_key: Uuid,
    /// The page this clip belongs to.
    pub page_id: Uuid,
    /// Display name (2–100 characters).
    pub display_name: String,
    /// Original uploaded file name.
    pub original_file_name: String,
    /// File size in bytes.
    pub file_size: i64,
    /// MIME type (audio/mpeg, audio/wav, ...).
    pub mime_type: String,
    /// Playback duration in seconds, if known.
    pub duration: Option<f64>,
    /// Full object-store key of the audio file.
    pub object_key: String,
    /// Admin who uploaded the clip, if known.
    pub uploaded_by: Option<Uuid>,
    /// Ordering among clips on the same page.
    pub sort_order: Option<i32>,
    /// When the clip was created.
    pub created_at: DateTime<Utc>,
    /// When the clip was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a new audio clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudio {
    /// Object-store key component for the clip.
    pub audio_key: Uuid,
    /// The page the clip belongs to.
    pub page_id: Uuid,
    /// Display name.
    pub display_name: String,
    /// Original uploaded file name.
    pub original_file_name: String,
    /// File size in bytes.
    pub file_size: i64,
    /// MIME type.
    pub mime_type: String,
    /// Full object-store key.
    pub object_key: String,
    /// Admin uploading the clip.
    pub uploaded_by: Option<Uuid>,
}
