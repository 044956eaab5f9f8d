//! # lectern-realtime
//!
//! Server-sent event delivery for PDF conversion progress. Each upload
//! gets a channel keyed by its storage key; the conversion callback
//! publishes into it and the SSE endpoint drains it.

pub mod notifier;

pub use notifier::{ConversionEvent, ConversionNotifier};
