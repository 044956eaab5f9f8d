//! Per-page HTML overlays.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use lectern_core::error::AppError;
use lectern_core::result::AppResult;
use lectern_database::repositories::page::PageRepository;
use lectern_entity::page::Page;
use lectern_storage::keys::html_layer_key;
use lectern_storage::object_store::{HtmlLayer, ObjectStore};

use crate::context::RequestContext;

/// Largest accepted overlay, in bytes.
const MAX_HTML_BYTES: usize = 1024 * 1024;

/// Stores and serves per-page HTML overlays.
#[derive(Debug, Clone)]
pub struct HtmlLayerService {
    pages: Arc<PageRepository>,
    store: Arc<ObjectStore>,
}

impl HtmlLayerService {
    /// Creates a new HTML layer service.
    pub fn new(pages: Arc<PageRepository>, store: Arc<ObjectStore>) -> Self {
        Self { pages, store }
    }

    /// Saves a page's overlay, replacing any previous one.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        page_id: Uuid,
        html_content: &str,
    ) -> AppResult<()> {
        if html_content.len() > MAX_HTML_BYTES {
            return Err(AppError::validation("HTML overlay exceeds the 1 MB limit"));
        }

        let page = self.get_page(page_id).await?;
        self.store
            .put_html_layer(&html_layer_key(page.page_key), html_content)
            .await?;

        info!(
            user_id = %ctx.user_id,
            page_id = %page_id,
            bytes = html_content.len(),
            "HTML overlay saved"
        );
        Ok(())
    }

    /// Fetches a page's overlay; a page without one yields empty content.
    pub async fn fetch(&self, page_id: Uuid) -> AppResult<HtmlLayer> {
        let page = self.get_page(page_id).await?;
        self.store
            .get_html_layer(&html_layer_key(page.page_key))
            .await
    }

    async fn get_page(&self, page_id: Uuid) -> AppResult<Page> {
        self.pages
            .find_by_id(page_id)
            .await?
            .ok_or_else(|| AppError::not_found("Page not found"))
    }
}
