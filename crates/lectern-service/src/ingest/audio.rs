//! Audio clip attachment: presigned uploads, listing, deletion.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_database::repositories::audio::AudioRepository;
use lectern_database::repositories::page::PageRepository;
use lectern_entity::audio::{Audio, CreateAudio};
use lectern_entity::page::Page;
use lectern_storage::keys::{audio_key, mime_from_file_name};
use lectern_storage::object_store::{ObjectStore, PresignedUpload};

use crate::context::RequestContext;

/// Allowed audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "aac", "m4a", "flac"];

/// Request to attach an audio clip to a page.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AttachAudioRequest {
    /// Display name, 2 to 100 characters.
    pub display_name: String,
    /// Original file name including extension.
    pub file_name: String,
    /// File size in bytes.
    pub file_size: u64,
}

/// A registered clip plus the URL to upload its bytes through.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AudioUpload {
    pub audio: Audio,
    pub upload: PresignedUpload,
}

/// Manages audio clips attached to content pages.
#[derive(Debug, Clone)]
pub struct AudioService {
    pool: PgPool,
    pages: Arc<PageRepository>,
    audios: Arc<AudioRepository>,
    store: Arc<ObjectStore>,
    max_audio_size_bytes: u64,
}

impl AudioService {
    /// Creates a new audio service.
    pub fn new(
        pool: PgPool,
        pages: Arc<PageRepository>,
        audios: Arc<AudioRepository>,
        store: Arc<ObjectStore>,
        max_audio_size_bytes: u64,
    ) -> Self {
        Self {
            pool,
            pages,
            audios,
            store,
            max_audio_size_bytes,
        }
    }

    /// Registers a clip on a page and returns a presigned upload URL.
    ///
    /// The database row and the presigned URL are produced in one
    /// transaction, so a failed presign leaves no orphan row behind.
    pub async fn attach(
        &self,
        ctx: &RequestContext,
        page_id: Uuid,
        req: AttachAudioRequest,
    ) -> AppResult<AudioUpload> {
        validate_audio_upload(&req, self.max_audio_size_bytes)?;

        let page = self.get_page(page_id).await?;

        let clip_key = Uuid::new_v4();
        let object_key = audio_key(page.page_key, clip_key, &req.file_name);
        let mime_type = mime_from_file_name(&req.file_name);

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let audio = self
            .audios
            .insert(
                &mut tx,
                &CreateAudio {
                    audio_key: clip_key,
                    page_id: page.id,
                    display_name: req.display_name.trim().to_string(),
                    original_file_name: req.file_name.clone(),
                    file_size: req.file_size as i64,
                    mime_type: mime_type.to_string(),
                    object_key: object_key.clone(),
                    uploaded_by: Some(ctx.user_id),
                },
            )
            .await?;

        let upload = self
            .store
            .presign_audio_upload(&object_key, mime_type, req.file_size)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            user_id = %ctx.user_id,
            page_id = %page_id,
            audio_id = %audio.id,
            file_name = %req.file_name,
            "Audio upload presigned"
        );

        Ok(AudioUpload { audio, upload })
    }

    /// Lists clips attached to a page, newest first.
    pub async fn list(&self, page_id: Uuid) -> AppResult<Vec<Audio>> {
        self.get_page(page_id).await?;
        self.audios.list_by_page(page_id).await
    }

    /// Removes a clip: the row first, then the object best-effort.
    pub async fn delete(&self, ctx: &RequestContext, audio_id: Uuid) -> AppResult<()> {
        let audio = self
            .audios
            .find_by_id(audio_id)
            .await?
            .ok_or_else(|| AppError::not_found("Audio not found"))?;

        self.audios.delete(audio_id).await?;

        if let Err(e) = self.store.delete_object(&audio.object_key).await {
            warn!(audio_id = %audio_id, error = %e, "Audio object delete failed after row removal");
        }

        info!(user_id = %ctx.user_id, audio_id = %audio_id, "Audio deleted");
        Ok(())
    }

    async fn get_page(&self, page_id: Uuid) -> AppResult<Page> {
        self.pages
            .find_by_id(page_id)
            .await?
            .ok_or_else(|| AppError::not_found("Page not found"))
    }
}

/// Validates an audio attach request against name, extension, and size
/// limits.
fn validate_audio_upload(req: &AttachAudioRequest, max_size: u64) -> AppResult<()> {
    let name_chars = req.display_name.trim().chars().count();
    if !(2..=100).contains(&name_chars) {
        return Err(AppError::validation(
            "Display name must be 2 to 100 characters",
        ));
    }

    let extension = req
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported audio format; allowed: {}",
            AUDIO_EXTENSIONS.join(", ")
        )));
    }

    if req.file_size == 0 {
        return Err(AppError::validation("File size must be greater than zero"));
    }
    if req.file_size > max_size {
        return Err(AppError::validation(format!(
            "File exceeds the {} MB limit",
            max_size / (1024 * 1024)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u64 = 100 * 1024 * 1024;

    fn req(display_name: &str, file_name: &str, file_size: u64) -> AttachAudioRequest {
        AttachAudioRequest {
            display_name: display_name.to_string(),
            file_name: file_name.to_string(),
            file_size,
        }
    }

    #[test]
    fn accepts_supported_formats() {
        for name in ["a.mp3", "b.WAV", "c.ogg", "d.aac", "e.m4a", "f.flac"] {
            assert!(
                validate_audio_upload(&req("Chapter 1", name, 1024), MAX).is_ok(),
                "{name} should be accepted"
            );
        }
    }

    #[test]
    fn rejects_unsupported_formats() {
        assert!(validate_audio_upload(&req("Chapter 1", "a.exe", 1024), MAX).is_err());
        assert!(validate_audio_upload(&req("Chapter 1", "noext", 1024), MAX).is_err());
    }

    #[test]
    fn rejects_bad_display_names() {
        assert!(validate_audio_upload(&req("x", "a.mp3", 1024), MAX).is_err());
        assert!(validate_audio_upload(&req(&"y".repeat(101), "a.mp3", 1024), MAX).is_err());
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(validate_audio_upload(&req("Chapter 1", "a.mp3", 0), MAX).is_err());
        assert!(validate_audio_upload(&req("Chapter 1", "a.mp3", MAX + 1), MAX).is_err());
    }
}
