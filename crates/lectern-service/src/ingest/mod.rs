//! Binary content ingestion: PDF conversion, audio clips, HTML overlays.

pub mod audio;
pub mod html_layer;
pub mod pdf;

pub use audio::AudioService;
pub use html_layer::HtmlLayerService;
pub use pdf::PdfIngestService;
