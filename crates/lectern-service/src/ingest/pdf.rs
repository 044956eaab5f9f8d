//! PDF upload presigning and the conversion callback.
//!
//! The admin uploads a raw PDF straight to the temp bucket through a
//! presigned URL. An external worker renders it into page images and
//! calls back with the page list, which lands here and fans out to the
//! SSE stream watching that upload.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_database::repositories::material::MaterialRepository;
use lectern_database::repositories::page::PageRepository;
use lectern_entity::material::MaterialKind;
use lectern_entity::page::ConvertedPage;
use lectern_realtime::{ConversionEvent, ConversionNotifier};
use lectern_storage::keys::temp_pdf_key;
use lectern_storage::object_store::{ObjectStore, PresignedUpload};

use crate::context::RequestContext;

/// Callback payload sent by the conversion worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionCallback {
    /// Storage key of the book whose PDF was converted.
    pub storage_key: Uuid,
    /// Converted pages in page order.
    pub pages: Vec<ConvertedPage>,
}

/// Handles the PDF-to-pages ingestion flow.
#[derive(Debug, Clone)]
pub struct PdfIngestService {
    pool: PgPool,
    materials: Arc<MaterialRepository>,
    pages: Arc<PageRepository>,
    store: Arc<ObjectStore>,
    notifier: Arc<ConversionNotifier>,
    max_pdf_size_bytes: u64,
    callback_url: String,
}

impl PdfIngestService {
    /// Creates a new PDF ingest service.
    ///
    /// `public_url` is the externally reachable base URL of this server,
    /// used to build the callback the conversion worker posts to.
    pub fn new(
        pool: PgPool,
        materials: Arc<MaterialRepository>,
        pages: Arc<PageRepository>,
        store: Arc<ObjectStore>,
        notifier: Arc<ConversionNotifier>,
        max_pdf_size_bytes: u64,
        public_url: &str,
    ) -> Self {
        Self {
            pool,
            materials,
            pages,
            store,
            notifier,
            max_pdf_size_bytes,
            callback_url: format!(
                "{}/api/admin/uploads/pdf/complete",
                public_url.trim_end_matches('/')
            ),
        }
    }

    /// Issues a presigned PUT URL for a book's raw PDF.
    ///
    /// Also records the original file name on the material so the admin
    /// UI can show what was uploaded.
    pub async fn presign_pdf(
        &self,
        ctx: &RequestContext,
        material_id: Uuid,
        file_name: &str,
        file_size: u64,
    ) -> AppResult<PresignedUpload> {
        validate_pdf_upload(file_name, file_size, self.max_pdf_size_bytes)?;

        let mut material = self
            .materials
            .find_by_id(material_id)
            .await?
            .ok_or_else(|| AppError::not_found("Material not found"))?;
        if material.kind != MaterialKind::Book {
            return Err(AppError::validation("PDFs can only be uploaded to a book"));
        }

        let key = temp_pdf_key(material.storage_key, file_name);
        let upload = self
            .store
            .presign_pdf_upload(&key, file_size, &self.callback_url)
            .await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        material.original_file_name = Some(file_name.to_string());
        self.materials.update(&mut tx, &material).await?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            user_id = %ctx.user_id,
            material_id = %material_id,
            file_name,
            file_size,
            "PDF upload presigned"
        );

        Ok(upload)
    }

    /// Records the worker's conversion result and notifies the watcher.
    ///
    /// Pages and the total page count land in one transaction; the SSE
    /// event is published only after the commit, so a watcher never sees
    /// a completion it cannot read back.
    pub async fn conversion_complete(&self, callback: ConversionCallback) -> AppResult<()> {
        if callback.pages.is_empty() {
            return Err(AppError::validation(
                "Conversion callback must contain at least one page",
            ));
        }

        let material = self
            .materials
            .find_by_storage_key(callback.storage_key)
            .await?
            .ok_or_else(|| AppError::not_found("No material for this storage key"))?;

        let total_pages = callback.pages.len() as i32;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        self.pages
            .bulk_insert(&mut tx, material.id, &callback.pages)
            .await?;
        self.materials
            .set_conversion_result(&mut tx, material.id, total_pages)
            .await?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        self.notifier
            .publish(
                callback.storage_key,
                ConversionEvent::ConversionComplete {
                    material_id: material.id,
                    total_pages,
                },
            )
            .await;

        info!(
            material_id = %material.id,
            storage_key = %callback.storage_key,
            total_pages,
            "PDF conversion recorded"
        );

        Ok(())
    }

    /// Opens an event stream for a pending conversion.
    ///
    /// The stream starts with a `connected` event so clients can tell a
    /// healthy-but-quiet stream from a dead one.
    pub async fn subscribe(&self, storage_key: Uuid) -> AppResult<mpsc::Receiver<ConversionEvent>> {
        self.materials
            .find_by_storage_key(storage_key)
            .await?
            .ok_or_else(|| AppError::not_found("No material for this storage key"))?;

        let rx = self.notifier.subscribe(storage_key);
        self.notifier
            .publish(storage_key, ConversionEvent::Connected { storage_key })
            .await;
        Ok(rx)
    }

    /// Drops the event stream for a storage key.
    pub fn unsubscribe(&self, storage_key: Uuid) {
        self.notifier.disconnect(storage_key);
    }
}

/// Validates a PDF upload request against name and size limits.
fn validate_pdf_upload(file_name: &str, file_size: u64, max_size: u64) -> AppResult<()> {
    if file_name.trim().is_empty() {
        return Err(AppError::validation("File name is required"));
    }
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(AppError::validation("Only .pdf files can be uploaded"));
    }
    if file_size == 0 {
        return Err(AppError::validation("File size must be greater than zero"));
    }
    if file_size > max_size {
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

    const MAX: u64 = 50 * 1024 * 1024;

    #[test]
    fn accepts_a_pdf_within_limits() {
        assert!(validate_pdf_upload("lecture.pdf", 1024, MAX).is_ok());
        assert!(validate_pdf_upload("SCAN.PDF", MAX, MAX).is_ok());
    }

    #[test]
    fn rejects_non_pdf_extensions() {
        assert!(validate_pdf_upload("notes.docx", 1024, MAX).is_err());
        assert!(validate_pdf_upload("pdf", 1024, MAX).is_err());
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(validate_pdf_upload("a.pdf", 0, MAX).is_err());
        assert!(validate_pdf_upload("a.pdf", MAX + 1, MAX).is_err());
    }

    #[test]
    fn rejects_blank_file_names() {
        assert!(validate_pdf_upload("  ", 1024, MAX).is_err());
    }
}
