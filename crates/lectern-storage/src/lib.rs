//! # lectern-storage
//!
//! S3-compatible object store access: folder (prefix) deletion, presigned
//! upload URLs for PDFs and audio, and HTML overlay put/get.

pub mod keys;
pub mod object_store;

pub use object_store::{HtmlLayer, ObjectStore, PresignedUpload};
