//! PDF upload presigning, the conversion callback, and the SSE stream.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use uuid::Uuid;

use lectern_realtime::ConversionEvent;
use lectern_service::PdfIngestService;
use lectern_service::ingest::pdf::ConversionCallback;

use crate::dto::request::PdfPresignRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/materials/{id}/pdf
pub async fn presign_pdf(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PdfPresignRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let upload = state
        .pdf_service
        .presign_pdf(&auth, id, &req.file_name, req.file_size)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": upload })))
}

/// POST /api/admin/uploads/pdf/complete
///
/// Called by the external conversion worker, not by browsers; the
/// worker reads this URL from the uploaded object's metadata.
pub async fn conversion_complete(
    State(state): State<AppState>,
    Json(callback): Json<ConversionCallback>,
) -> ApiResult<Json<serde_json::Value>> {
    state.pdf_service.conversion_complete(callback).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/admin/uploads/pdf/events/{storage_key}
///
/// Server-sent events for a pending conversion. Unauthenticated because
/// `EventSource` cannot set headers; the storage key is an unguessable
/// UUID known only to the uploader.
pub async fn conversion_events(
    State(state): State<AppState>,
    Path(storage_key): Path<Uuid>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let rx = state.pdf_service.subscribe(storage_key).await?;

    let stream = ConversionEventStream {
        events: ReceiverStream::new(rx),
        pdf_service: Arc::clone(&state.pdf_service),
        storage_key,
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Event stream that unregisters its channel when the client disconnects,
/// so abandoned uploads do not accumulate registry entries.
struct ConversionEventStream {
    events: ReceiverStream<ConversionEvent>,
    pdf_service: Arc<PdfIngestService>,
    storage_key: Uuid,
}

impl Stream for ConversionEventStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.events).poll_next(cx) {
                Poll::Ready(Some(event)) => match Event::default().json_data(&event) {
                    Ok(sse_event) => return Poll::Ready(Some(Ok(sse_event))),
                    Err(e) => {
                        warn!(error = %e, "Failed to serialize conversion event");
                    }
                },
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl Drop for ConversionEventStream {
    fn drop(&mut self) {
        // The registry only drops channels whose receiver is gone, so
        // close ours before unregistering.
        self.events.close();
        self.pdf_service.unsubscribe(self.storage_key);
    }
}
